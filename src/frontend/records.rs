//! Input schema for attack trees.
//!
//! A tree arrives as an ordered JSON array of node records:
//!
//! ```json
//! [
//!   { "label": "Root Attack", "parent": "", "gate": "OR" },
//!   { "label": "Phishing", "parent": "Root Attack", "likelihood": 60 }
//! ]
//! ```
//!
//! `gate` and `likelihood` are optional. Record order is preserved all the way
//! through to summaries and rendering.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::errors::TreeError;

/// One node as it appears in the input document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub label: String,
    pub parent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likelihood: Option<f64>,
}

impl NodeRecord {
    /// A root record (`parent == ""`).
    pub fn root(label: impl Into<String>, gate: &str) -> Self {
        Self {
            label: label.into(),
            parent: String::new(),
            gate: Some(gate.to_string()),
            likelihood: None,
        }
    }

    /// An internal record with the given gate.
    pub fn branch(label: impl Into<String>, parent: impl Into<String>, gate: &str) -> Self {
        Self {
            label: label.into(),
            parent: parent.into(),
            gate: Some(gate.to_string()),
            likelihood: None,
        }
    }

    /// A leaf record carrying a likelihood.
    pub fn leaf(label: impl Into<String>, parent: impl Into<String>, likelihood: f64) -> Self {
        Self {
            label: label.into(),
            parent: parent.into(),
            gate: None,
            likelihood: Some(likelihood),
        }
    }
}

/// Decodes a JSON array of node records.
pub fn parse_records_json(json: &str) -> Result<Vec<NodeRecord>, TreeError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and decodes a JSON node list from disk.
pub fn read_records_file(path: impl AsRef<Path>) -> Result<Vec<NodeRecord>, TreeError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)
        .map_err(|e| TreeError::Io(format!("failed to read '{}': {}", path.display(), e)))?;
    parse_records_json(&source)
}
