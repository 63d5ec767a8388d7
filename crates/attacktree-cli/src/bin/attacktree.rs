//! Attacktree CLI - evaluate and edit attack trees from the command line
//!
//! Usage:
//!   attacktree <file>                              # Summarize a tree
//!   attacktree <file> --set "Phishing=80"          # Apply a leaf edit first
//!   attacktree <file> --set "Phishing=80" --reset  # Edit, then restore baseline
//!   attacktree <file> -o json                      # Tree, summary and chart columns as JSON
//!   attacktree <file> --list-leaves                # Show adjustable leaves

use std::process;

use attacktree::engine::session::SessionUpdate;
use attacktree::frontend::read_records_file;
use attacktree::render::{adjustable_leaves, summary_lines, SunburstSeries};
use attacktree::{EditSession, RootEntry, SessionConfig};
use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "attacktree")]
#[command(version)]
#[command(about = "Attacktree - attack tree likelihood aggregation CLI")]
#[command(long_about = "Load an attack tree, apply leaf edits and report the derived risk picture")]
struct Cli {
    /// Input JSON node list
    #[arg(value_name = "FILE")]
    file: String,

    /// Leaf edit applied in order, as LABEL=VALUE (repeatable)
    #[arg(short = 's', long = "set", value_name = "LABEL=VALUE", value_parser = parse_edit)]
    edits: Vec<(String, f64)>,

    /// Restore baseline leaf values after applying edits
    #[arg(short, long)]
    reset: bool,

    /// Recompute from this label instead of the tree's own root
    #[arg(long, value_name = "NAME")]
    root_label: Option<String>,

    /// Likelihood at or above which a node is high risk
    #[arg(short, long, default_value_t = attacktree::engine::config::DEFAULT_HIGH_RISK_THRESHOLD)]
    threshold: f64,

    /// Output format: summary, json, or debug
    #[arg(short, long, default_value = "summary", value_name = "FORMAT")]
    output: String,

    /// List the adjustable leaves instead of summarizing
    #[arg(short, long)]
    list_leaves: bool,
}

fn parse_edit(raw: &str) -> Result<(String, f64), String> {
    let (label, value) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected LABEL=VALUE, got '{}'", raw))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid likelihood '{}': {}", value, e))?;
    Ok((label.trim().to_string(), value))
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let records = match read_records_file(&cli.file) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error loading '{}': {}", cli.file, e);
            process::exit(1);
        }
    };

    let mut config = SessionConfig::default().with_high_risk_threshold(cli.threshold);
    if let Some(label) = &cli.root_label {
        config = config.with_root_entry(RootEntry::Fixed(label.clone()));
    }

    let mut session = match EditSession::load(&records, config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Invalid attack tree: {}", e);
            process::exit(1);
        }
    };

    for (label, value) in &cli.edits {
        session.edit_leaf(label, *value);
    }
    if cli.reset {
        session.reset();
    }

    if cli.list_leaves {
        let leaves = adjustable_leaves(session.current_tree());
        if leaves.is_empty() {
            println!("No adjustable leaves in this tree");
        } else {
            println!("Leaves in '{}':", cli.file);
            for leaf in leaves {
                println!("  - {} = {}", leaf.label, leaf.value);
            }
        }
        return;
    }

    let update = session.view();
    match cli.output.as_str() {
        "json" => match serde_json::to_string_pretty(&format_update(&update)) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing to JSON: {}", e);
                process::exit(1);
            }
        },
        "debug" => {
            println!("{:#?}", session);
            println!("{:#?}", update.tree);
        }
        _ => print_summary(&session, &update),
    }
}

fn print_summary(session: &EditSession, update: &SessionUpdate<'_>) {
    println!(
        "✓ Attack tree loaded: {} nodes, entry '{}' = {}%\n",
        update.tree.len(),
        session.entry_label(),
        update.tree.likelihood_of(session.entry_label())
    );
    for line in summary_lines(update.summary, session.config().high_risk_threshold) {
        println!("{}", line);
    }
}

/// Format the session state for JSON serialization
fn format_update(update: &SessionUpdate<'_>) -> serde_json::Value {
    json!({
        "tree": update.tree.nodes(),
        "summary": update.summary,
        "sunburst": SunburstSeries::from_tree(update.tree),
    })
}
