//! # Attacktree - Attack Tree Likelihood Engine
//!
//! Attacktree maintains a hierarchy of threat nodes. Leaf likelihoods are
//! supplied by the user; internal likelihoods are derived bottom-up through
//! AND/OR gates, treating children as independent events.
//!
//! ## Architecture
//!
//! The system is organized into several modules:
//!
//! - **frontend**: Input records, JSON decoding and load-boundary validation
//! - **engine**: Tree storage, gate evaluation, baseline and edit sessions
//! - **metrics**: Risk summary statistics
//! - **render**: Chart columns, slider listing and summary text for front ends
//!
//! ## Usage
//!
//! ```rust,ignore
//! use attacktree::{EditSession, SessionConfig};
//!
//! let records = attacktree::frontend::parse_records_json(r#"[
//!     {"label": "Root", "parent": "", "gate": "OR"},
//!     {"label": "A", "parent": "Root", "likelihood": 60},
//!     {"label": "B", "parent": "Root", "likelihood": 40}
//! ]"#)?;
//!
//! let mut session = EditSession::load(&records, SessionConfig::default())?;
//! assert_eq!(session.current_tree().likelihood_of("Root"), 76.0);
//!
//! let update = session.edit_leaf("A", 10.0);
//! println!("average risk: {:.1}", update.summary.average);
//! ```

#![forbid(unsafe_code)]

pub mod engine;
pub mod frontend;
pub mod metrics;
pub mod render;

// Re-export commonly used types
pub use engine::config::{RootEntry, SessionConfig};
pub use engine::errors::TreeError;
pub use engine::gate_eval::{compute_likelihood, evaluate, Evaluation};
pub use engine::session::{EditSession, SessionChange, SessionObserver, SessionUpdate};
pub use engine::tree::{AttackTree, Gate, Node};
pub use frontend::records::NodeRecord;
pub use metrics::{summarize, RiskSummary};

/// Validates node records and builds an attack tree from them.
///
/// Internal likelihoods are not computed; run [`compute_likelihood`] from the
/// root or start an [`EditSession`].
///
/// # Arguments
///
/// * `records` - Node records in storage order
///
/// # Returns
///
/// * `Ok(AttackTree)` - The tree, in record order
/// * `Err(TreeError::Validation)` - Duplicate labels, bad root count, unknown
///   parents, cycles or out-of-range likelihoods
pub fn load_tree(records: &[NodeRecord]) -> Result<AttackTree, TreeError> {
    frontend::validate::validate_records(records)?;
    Ok(AttackTree::from_records(records))
}

/// Decodes a JSON node list, validates it and builds the tree.
pub fn load_tree_json(json: &str) -> Result<AttackTree, TreeError> {
    let records = frontend::records::parse_records_json(json)?;
    load_tree(&records)
}
