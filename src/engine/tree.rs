//! # Attack Tree Store
//!
//! This module holds the node collection of an attack tree and answers the
//! structural questions the evaluator and summary need.
//!
//! ## Key Components
//!
//! - **Gate**: the AND/OR combination rule of an internal node, parsed once at
//!   load time
//! - **Node**: label, parent link, gate and the optional likelihood in [0, 100]
//! - **AttackTree**: ordered node storage with label and children indexes
//!
//! ## Design
//!
//! Storage order is insertion order and is the iteration order everywhere.
//! Tree shape (`label`, `parent`, `gate`) is fixed after construction, so the
//! indexes are built once; only likelihoods are mutable afterwards.
//!
//! A node with no children is a leaf. Structural queries on a label that is
//! not in the tree answer as if it were a childless leaf, so callers that care
//! about existence must use [`AttackTree::find`].

use std::fmt;

use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;

use crate::frontend::records::NodeRecord;

/// Boolean combination rule of an internal node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Gate {
    /// All children must succeed.
    #[serde(rename = "AND")]
    And,
    /// At least one child succeeds (noisy-OR).
    #[default]
    #[serde(rename = "OR")]
    Or,
}

impl Gate {
    /// Parses a gate string case-insensitively; anything but "AND" is OR.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.trim().eq_ignore_ascii_case("AND") => Gate::And,
            _ => Gate::Or,
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::And => write!(f, "AND"),
            Gate::Or => write!(f, "OR"),
        }
    }
}

/// A threat node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// Globally unique identifier
    pub label: String,
    /// Parent label, empty for the root
    pub parent: String,
    /// Combination rule; ignored on leaves
    pub gate: Gate,
    /// Authoritative on leaves, a derived cache on internal nodes
    pub likelihood: Option<f64>,
}

impl Node {
    pub fn is_root(&self) -> bool {
        self.parent.is_empty()
    }

    /// The stored likelihood, 0 when absent.
    pub fn likelihood_or_zero(&self) -> f64 {
        self.likelihood.unwrap_or(0.0)
    }
}

impl From<&NodeRecord> for Node {
    fn from(record: &NodeRecord) -> Self {
        Node {
            label: record.label.clone(),
            parent: record.parent.clone(),
            gate: Gate::parse(record.gate.as_deref()),
            likelihood: record.likelihood,
        }
    }
}

type ChildList = SmallVec<[usize; 4]>;

/// Ordered node collection with structural lookups.
#[derive(Debug, Clone, Default)]
pub struct AttackTree {
    nodes: Vec<Node>,
    /// Label to position of the first node carrying it
    label_index: FxHashMap<String, usize>,
    /// Parent label to child positions, in storage order
    children: FxHashMap<String, ChildList>,
}

impl AttackTree {
    /// Builds a tree from nodes without validating them.
    ///
    /// Well-formedness (unique labels, a single root, acyclic parent links) is
    /// a precondition; use [`crate::load_tree`] to validate at the boundary.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        let mut label_index = FxHashMap::default();
        let mut children: FxHashMap<String, ChildList> = FxHashMap::default();
        for (idx, node) in nodes.iter().enumerate() {
            label_index.entry(node.label.clone()).or_insert(idx);
            if !node.parent.is_empty() {
                children.entry(node.parent.clone()).or_default().push(idx);
            }
        }
        Self {
            nodes,
            label_index,
            children,
        }
    }

    /// Builds a tree from input records without validating them.
    pub fn from_records(records: &[NodeRecord]) -> Self {
        Self::from_nodes(records.iter().map(Node::from).collect())
    }

    /// All nodes in storage order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node by label.
    pub fn find(&self, label: &str) -> Option<&Node> {
        self.index_of(label).map(|idx| &self.nodes[idx])
    }

    /// Position of the node carrying `label` in storage order.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.label_index.get(label).copied()
    }

    /// Children of `label` in storage order.
    ///
    /// Empty for leaves and for labels that do not exist.
    pub fn children_of(&self, label: &str) -> impl Iterator<Item = &Node> + '_ {
        self.child_indices(label).iter().map(move |&idx| &self.nodes[idx])
    }

    /// Storage positions of the children of `label`.
    pub fn child_indices(&self, label: &str) -> &[usize] {
        self.children.get(label).map(|c| c.as_slice()).unwrap_or(&[])
    }

    /// True iff no node names `label` as its parent.
    ///
    /// Vacuously true for a label that is not in the tree.
    pub fn is_leaf(&self, label: &str) -> bool {
        !self.children.contains_key(label)
    }

    /// Nodes with an empty parent, in storage order.
    pub fn roots(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|n| n.is_root())
    }

    /// Label of the first root node.
    pub fn root_label(&self) -> Option<&str> {
        self.roots().next().map(|n| n.label.as_str())
    }

    /// Leaf nodes in storage order.
    pub fn leaves(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|n| self.is_leaf(&n.label))
    }

    /// Current likelihood of `label`, 0 when the node or its value is absent.
    pub fn likelihood_of(&self, label: &str) -> f64 {
        self.find(label).map(Node::likelihood_or_zero).unwrap_or(0.0)
    }

    /// Overwrites the likelihood of the node carrying `label`.
    ///
    /// No leaf check and no range check. Returns false if the label is absent.
    pub fn set_likelihood(&mut self, label: &str, value: Option<f64>) -> bool {
        match self.index_of(label) {
            Some(idx) => {
                self.nodes[idx].likelihood = value;
                true
            }
            None => false,
        }
    }

    /// Converts the tree back into input records.
    pub fn to_records(&self) -> Vec<NodeRecord> {
        self.nodes
            .iter()
            .map(|n| NodeRecord {
                label: n.label.clone(),
                parent: n.parent.clone(),
                gate: Some(n.gate.to_string()),
                likelihood: n.likelihood,
            })
            .collect()
    }
}
