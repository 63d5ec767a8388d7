//! # Load-Boundary Validation
//!
//! The evaluation core assumes a well-formed tree. This module checks the
//! input records before a tree is built from them:
//!
//! - at least one record
//! - every label is non-empty
//! - unique labels
//! - exactly one root (`parent == ""`)
//! - every non-empty `parent` names an existing label
//! - the parent relation is acyclic
//! - likelihoods, where present, are finite and within [0, 100]
//!
//! Leaves without a likelihood are accepted and evaluate as 0.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::engine::errors::{TreeError, ValidationKind};
use crate::frontend::records::NodeRecord;

/// Lowest accepted likelihood.
pub const MIN_LIKELIHOOD: f64 = 0.0;
/// Highest accepted likelihood.
pub const MAX_LIKELIHOOD: f64 = 100.0;

/// Validates input records, returning the first problem found.
pub fn validate_records(records: &[NodeRecord]) -> Result<(), TreeError> {
    if records.is_empty() {
        return Err(TreeError::validation(
            ValidationKind::EmptyTree,
            None,
            "attack tree has no nodes",
        ));
    }

    let mut parents: FxHashMap<&str, &str> = FxHashMap::default();
    for (position, record) in records.iter().enumerate() {
        if record.label.is_empty() {
            return Err(TreeError::validation(
                ValidationKind::EmptyLabel,
                None,
                format!("record {} has an empty label", position),
            ));
        }
        if parents.insert(&record.label, &record.parent).is_some() {
            return Err(TreeError::validation(
                ValidationKind::DuplicateLabel,
                Some(record.label.as_str()),
                format!("label '{}' appears more than once", record.label),
            ));
        }
    }

    validate_roots(records)?;

    for record in records {
        if !record.parent.is_empty() && !parents.contains_key(record.parent.as_str()) {
            return Err(TreeError::validation(
                ValidationKind::UnknownParent,
                Some(record.label.as_str()),
                format!("parent '{}' does not exist", record.parent),
            ));
        }
        if let Some(likelihood) = record.likelihood {
            validate_likelihood(&record.label, likelihood)?;
        }
    }

    validate_acyclic(records, &parents)
}

fn validate_roots(records: &[NodeRecord]) -> Result<(), TreeError> {
    let roots: Vec<&str> = records
        .iter()
        .filter(|r| r.parent.is_empty())
        .map(|r| r.label.as_str())
        .collect();

    match roots.as_slice() {
        [_] => Ok(()),
        [] => Err(TreeError::validation(
            ValidationKind::MissingRoot,
            None,
            "no node has an empty parent",
        )),
        [_, second, ..] => Err(TreeError::validation(
            ValidationKind::MultipleRoots,
            Some(*second),
            format!("found {} root nodes: {}", roots.len(), roots.join(", ")),
        )),
    }
}

fn validate_likelihood(label: &str, likelihood: f64) -> Result<(), TreeError> {
    if !likelihood.is_finite() || !(MIN_LIKELIHOOD..=MAX_LIKELIHOOD).contains(&likelihood) {
        return Err(TreeError::validation(
            ValidationKind::LikelihoodOutOfRange,
            Some(label),
            format!(
                "likelihood {} is outside [{}, {}]",
                likelihood, MIN_LIKELIHOOD, MAX_LIKELIHOOD
            ),
        ));
    }
    Ok(())
}

/// Walks each node's ancestor chain; revisiting a label on the current chain
/// means a cycle. Chains already proven to reach the root are not rewalked.
fn validate_acyclic(records: &[NodeRecord], parents: &FxHashMap<&str, &str>) -> Result<(), TreeError> {
    let mut reaches_root: FxHashSet<&str> = FxHashSet::default();

    for record in records {
        let mut chain: Vec<&str> = Vec::new();
        let mut on_chain: FxHashSet<&str> = FxHashSet::default();
        let mut current = record.label.as_str();

        loop {
            if current.is_empty() || reaches_root.contains(current) {
                break;
            }
            if !on_chain.insert(current) {
                return Err(TreeError::validation(
                    ValidationKind::Cycle,
                    Some(current),
                    format!("parent chain of '{}' loops back to '{}'", record.label, current),
                ));
            }
            chain.push(current);
            current = parents.get(current).copied().unwrap_or("");
        }

        reaches_root.extend(chain);
    }

    Ok(())
}
