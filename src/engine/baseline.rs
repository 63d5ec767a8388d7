//! Baseline snapshot of a freshly loaded tree.
//!
//! The baseline is an immutable deep copy taken at load time and kept for the
//! lifetime of a session. Reset restores leaf likelihoods from it.

use crate::engine::tree::AttackTree;

/// Metadata recorded when the baseline was captured.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineMetadata {
    /// Engine version string
    pub version: String,
    /// Number of nodes at capture time
    pub node_count: usize,
    /// Number of leaves at capture time
    pub leaf_count: usize,
}

/// Immutable copy of the tree as loaded.
#[derive(Debug, Clone)]
pub struct Baseline {
    tree: AttackTree,
    metadata: BaselineMetadata,
}

impl Baseline {
    /// Captures a deep copy of `tree`.
    pub fn capture(tree: &AttackTree) -> Self {
        let metadata = BaselineMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            node_count: tree.len(),
            leaf_count: tree.leaves().count(),
        };
        Self {
            tree: tree.clone(),
            metadata,
        }
    }

    pub fn tree(&self) -> &AttackTree {
        &self.tree
    }

    pub fn metadata(&self) -> &BaselineMetadata {
        &self.metadata
    }

    /// Restores baseline likelihoods into every node of `live` that exists
    /// and is currently a leaf there.
    ///
    /// Leafness is judged against the live tree's shape. Internal nodes are
    /// left alone; the next recompute corrects them. Returns the number of
    /// leaves restored.
    pub fn restore_into(&self, live: &mut AttackTree) -> usize {
        let mut restored = 0;
        for saved in self.tree.nodes() {
            if live.find(&saved.label).is_none() || !live.is_leaf(&saved.label) {
                continue;
            }
            live.set_likelihood(&saved.label, saved.likelihood);
            restored += 1;
        }
        restored
    }
}
