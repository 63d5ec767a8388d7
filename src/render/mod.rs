//! Outputs handed to rendering front ends.
//!
//! Nothing here aggregates: everything reads the recomputed tree or summary.
//!
//! - [`SunburstSeries`]: parallel label/parent/value columns for a
//!   hierarchical proportion chart
//! - [`adjustable_leaves`]: one slider per non-root leaf
//! - [`summary_lines`]: the textual assessment panel; derived values keep
//!   their decimal (`92.0%`), whole leaf inputs print without one (`80%`)

use serde::Serialize;

use crate::engine::tree::AttackTree;
use crate::metrics::{NodeRisk, RiskSummary};

/// How a chart sizes internal segments relative to their children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchValues {
    /// A node's value is what remains beyond its children.
    Remainder,
}

/// Column data for a sunburst chart.
///
/// The three columns always have equal length, one entry per node in storage
/// order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SunburstSeries {
    pub labels: Vec<String>,
    pub parents: Vec<String>,
    pub values: Vec<f64>,
    pub branch_values: BranchValues,
}

impl SunburstSeries {
    /// Builds the columns from the current tree; absent likelihoods are 0.
    pub fn from_tree(tree: &AttackTree) -> Self {
        let nodes = tree.nodes();
        Self {
            labels: nodes.iter().map(|n| n.label.clone()).collect(),
            parents: nodes.iter().map(|n| n.parent.clone()).collect(),
            values: nodes.iter().map(|n| n.likelihood_or_zero()).collect(),
            branch_values: BranchValues::Remainder,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Slider range shared by every leaf control.
pub const SLIDER_MIN: f64 = 0.0;
pub const SLIDER_MAX: f64 = 100.0;
pub const SLIDER_STEP: f64 = 1.0;

/// An input control bound to one leaf likelihood.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeafControl {
    pub label: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// Controls for every leaf except the root, in storage order.
pub fn adjustable_leaves(tree: &AttackTree) -> Vec<LeafControl> {
    let root = tree.root_label();
    tree.leaves()
        .filter(|n| Some(n.label.as_str()) != root)
        .map(|n| LeafControl {
            label: n.label.clone(),
            value: n.likelihood_or_zero(),
            min: SLIDER_MIN,
            max: SLIDER_MAX,
            step: SLIDER_STEP,
        })
        .collect()
}

/// Formats a whole input value without a decimal, anything else as is.
fn format_likelihood(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Derived values always keep their decimal (`92.0`); leaf inputs print as
/// entered (`80`, `12.5`).
fn format_node_likelihood(node: &NodeRisk) -> String {
    if node.derived {
        format!("{:?}", node.likelihood)
    } else {
        format_likelihood(node.likelihood)
    }
}

/// Text lines of the assessment panel.
pub fn summary_lines(summary: &RiskSummary, threshold: f64) -> Vec<String> {
    let mut lines = vec![
        "Threat Summary".to_string(),
        format!("Average Risk Per Node: {:.1}%", summary.average),
    ];
    if let Some(highest) = &summary.highest {
        lines.push(format!(
            "Most Vulnerable Node: {} ({}%)",
            highest.label,
            format_node_likelihood(highest)
        ));
    }

    lines.push("Risk Breakdown by Branch".to_string());
    for branch in &summary.branch_risks {
        lines.push(format!("• {}: {:.1}%", branch.parent, branch.average));
    }

    if !summary.high_risk.is_empty() {
        lines.push(format!("High Risk Nodes (≥ {}%)", format_likelihood(threshold)));
        for node in &summary.high_risk {
            lines.push(format!(
                "• {} — {}%",
                node.label,
                format_node_likelihood(node)
            ));
        }
    }
    lines
}
