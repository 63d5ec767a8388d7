//! Risk summary statistics.
//!
//! Computes the assessment figures shown next to an attack tree:
//! - `average`: mean likelihood over every node that carries one, root included
//! - `highest`: the non-root node with the largest likelihood
//! - `branch_risks`: mean likelihood of non-root nodes grouped by immediate parent
//! - `high_risk`: non-root nodes at or above the high-risk threshold
//!
//! Notes:
//! - Deterministic evaluation: storage order decides ties and group order.
//! - Numeric stability: Kahan summation for the means.
//! - Branch groups mix leaves and internal children of the same parent; no
//!   level separation is attempted.

use serde::Serialize;

use crate::engine::config::DEFAULT_HIGH_RISK_THRESHOLD;
use crate::engine::tree::{AttackTree, Node};

/// A node label with its likelihood.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRisk {
    pub label: String,
    pub likelihood: f64,
    /// True for internal nodes, whose likelihood the gates derived
    pub derived: bool,
}

impl NodeRisk {
    fn from_node(tree: &AttackTree, node: &Node, likelihood: f64) -> Self {
        Self {
            label: node.label.clone(),
            likelihood,
            derived: !tree.is_leaf(&node.label),
        }
    }
}

/// Mean likelihood of the nodes sharing one parent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchRisk {
    pub parent: String,
    pub average: f64,
    pub count: usize,
}

/// Aggregate risk figures for one tree state.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RiskSummary {
    pub average: f64,
    pub highest: Option<NodeRisk>,
    /// Groups in order of first appearance
    pub branch_risks: Vec<BranchRisk>,
    /// Storage order
    pub high_risk: Vec<NodeRisk>,
}

impl RiskSummary {
    /// Average for the branch under `parent`, if any child carries a likelihood.
    pub fn branch_average(&self, parent: &str) -> Option<f64> {
        self.branch_risks
            .iter()
            .find(|b| b.parent == parent)
            .map(|b| b.average)
    }
}

/// Running Kahan-compensated sum.
#[derive(Debug, Default, Clone, Copy)]
struct KahanSum {
    sum: f64,
    c: f64,
    count: usize,
}

impl KahanSum {
    fn add(&mut self, term: f64) {
        let y = term - self.c;
        let t = self.sum + y;
        self.c = (t - self.sum) - y;
        self.sum = t;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Summarizes `tree` with the default high-risk threshold.
pub fn summarize(tree: &AttackTree) -> RiskSummary {
    summarize_with_threshold(tree, DEFAULT_HIGH_RISK_THRESHOLD)
}

/// Summarizes `tree`, counting nodes at or above `threshold` as high risk.
///
/// Pure over the current tree state; internal likelihoods are used as they
/// are cached, so callers recompute first.
pub fn summarize_with_threshold(tree: &AttackTree, threshold: f64) -> RiskSummary {
    let mut total = KahanSum::default();
    let mut highest: Option<NodeRisk> = None;
    let mut groups: Vec<(String, KahanSum)> = Vec::new();
    let mut high_risk = Vec::new();

    for node in tree.nodes() {
        let Some(likelihood) = node.likelihood else {
            continue;
        };
        total.add(likelihood);

        if node.is_root() {
            continue;
        }

        // First maximum wins.
        if highest.as_ref().map_or(true, |h| likelihood > h.likelihood) {
            highest = Some(NodeRisk::from_node(tree, node, likelihood));
        }

        match groups.iter_mut().find(|(parent, _)| *parent == node.parent) {
            Some((_, sum)) => sum.add(likelihood),
            None => {
                let mut sum = KahanSum::default();
                sum.add(likelihood);
                groups.push((node.parent.clone(), sum));
            }
        }

        if likelihood >= threshold {
            high_risk.push(NodeRisk::from_node(tree, node, likelihood));
        }
    }

    RiskSummary {
        average: total.mean(),
        highest,
        branch_risks: groups
            .into_iter()
            .map(|(parent, sum)| BranchRisk {
                parent,
                average: sum.mean(),
                count: sum.count,
            })
            .collect(),
        high_risk,
    }
}
