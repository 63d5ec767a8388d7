//! # Gate Evaluation
//!
//! Derives internal-node likelihoods bottom-up from leaf likelihoods.
//!
//! Each internal node combines its children's probabilities (likelihood / 100)
//! through its gate, treating children as independent events:
//!
//! ```text
//! AND:  p = Π pᵢ
//! OR:   p = 1 − Π (1 − pᵢ)      (noisy-OR)
//! ```
//!
//! The result is scaled back to [0, 100] and rounded to one decimal place.
//! Parents combine their children's *rounded* values.
//!
//! Evaluation is an explicit post-order pass that produces an [`Evaluation`]
//! table and leaves the tree untouched; [`Evaluation::apply`] writes the table
//! back as each internal node's cached likelihood. [`compute_likelihood`] does
//! both.
//!
//! The walk assumes an acyclic parent relation. Cyclic input never terminates.

use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;

use crate::engine::tree::{AttackTree, Gate};

/// Result of evaluating one entry label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Label evaluation started from
    pub entry: String,
    /// Likelihood of the entry node, 0 if it does not exist
    pub value: f64,
    /// Derived likelihood of every internal node reached, children first
    pub derived: Vec<DerivedLikelihood>,
}

/// A derived likelihood for one internal node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedLikelihood {
    pub label: String,
    pub likelihood: f64,
}

impl Evaluation {
    fn without_derivation(entry: &str, value: f64) -> Self {
        Self {
            entry: entry.to_string(),
            value,
            derived: Vec::new(),
        }
    }

    /// Derived likelihood for `label`, if the pass reached it as an internal node.
    pub fn derived_value(&self, label: &str) -> Option<f64> {
        self.derived
            .iter()
            .find(|d| d.label == label)
            .map(|d| d.likelihood)
    }

    /// Writes every derived likelihood into the tree's cache.
    pub fn apply(&self, tree: &mut AttackTree) {
        for d in &self.derived {
            tree.set_likelihood(&d.label, Some(d.likelihood));
        }
    }
}

/// Combines child probabilities in [0, 1] through a gate.
///
/// With no children AND yields 1 (empty product) and OR yields 0.
pub fn combine(gate: Gate, probs: &[f64]) -> f64 {
    match gate {
        Gate::And => probs.iter().product(),
        Gate::Or => 1.0 - probs.iter().map(|p| 1.0 - p).product::<f64>(),
    }
}

/// Rounds a likelihood to one decimal place.
///
/// Rounds the exact binary value with ties to even, so a product stored as
/// 0.1499… rounds to 0.1.
pub fn round_likelihood(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Evaluates the likelihood of `label` without mutating the tree.
///
/// - A label that is not in the tree evaluates to 0.
/// - A leaf evaluates to its stored likelihood (0 if absent), unrounded.
/// - An internal node evaluates through its gate over its children.
pub fn evaluate(tree: &AttackTree, label: &str) -> Evaluation {
    let Some(start) = tree.index_of(label) else {
        #[cfg(feature = "tracing")]
        tracing::warn!(entry = label, "evaluation entry label not found; treating as 0");
        return Evaluation::without_derivation(label, 0.0);
    };

    let nodes = tree.nodes();
    if tree.is_leaf(label) {
        return Evaluation::without_derivation(label, nodes[start].likelihood_or_zero());
    }

    let mut values: FxHashMap<usize, f64> = FxHashMap::default();
    let mut derived = Vec::new();
    // (position, children already pushed)
    let mut stack: Vec<(usize, bool)> = vec![(start, false)];

    while let Some((idx, expanded)) = stack.pop() {
        let node = &nodes[idx];
        let children = tree.child_indices(&node.label);

        if children.is_empty() {
            values.insert(idx, node.likelihood_or_zero());
            continue;
        }

        if !expanded {
            stack.push((idx, true));
            // Reverse so children pop in storage order.
            stack.extend(children.iter().rev().map(|&c| (c, false)));
            continue;
        }

        let probs: SmallVec<[f64; 8]> = children
            .iter()
            .map(|c| values.get(c).copied().unwrap_or(0.0) / 100.0)
            .collect();
        let likelihood = round_likelihood(combine(node.gate, &probs) * 100.0);
        values.insert(idx, likelihood);
        derived.push(DerivedLikelihood {
            label: node.label.clone(),
            likelihood,
        });
    }

    let value = values.get(&start).copied().unwrap_or(0.0);

    #[cfg(feature = "tracing")]
    tracing::debug!(entry = label, value, derived = derived.len(), "evaluated attack tree");

    Evaluation {
        entry: label.to_string(),
        value,
        derived,
    }
}

/// Computes the likelihood of `label` and caches every derived internal value
/// back into the tree.
pub fn compute_likelihood(tree: &mut AttackTree, label: &str) -> f64 {
    let evaluation = evaluate(tree, label);
    evaluation.apply(tree);
    evaluation.value
}
