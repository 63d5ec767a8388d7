//! # Edit Session
//!
//! The mutate → recompute → summarize protocol around one live attack tree.
//!
//! A session owns the live tree, the baseline captured at load and the
//! current summary. Every command runs to completion before returning:
//!
//! 1. mutate leaf likelihoods (`edit_leaf`, `reset`)
//! 2. recompute every internal likelihood from the entry label
//! 3. recompute the summary
//! 4. notify observers
//!
//! Recompute is always a full, non-incremental pass. `&mut self` on every
//! command serializes edits; a caller sharing a session across threads must
//! wrap it in a lock.
//!
//! ## Entry label
//!
//! Recompute starts from the label chosen by [`RootEntry`]. With a fixed label
//! that is not in the tree the evaluator sees a missing node: nothing is
//! recomputed, edited leaves change but internal values go stale.

use crate::engine::baseline::Baseline;
use crate::engine::config::{RootEntry, SessionConfig};
use crate::engine::errors::TreeError;
use crate::engine::gate_eval;
use crate::engine::tree::AttackTree;
use crate::frontend::records::NodeRecord;
use crate::frontend::validate::validate_records;
use crate::metrics::{summarize_with_threshold, RiskSummary};

/// Receives the recomputed tree and summary after each completed command.
pub trait SessionObserver {
    fn on_update(&self, tree: &AttackTree, summary: &RiskSummary, change: &SessionChange);
}

/// What a command changed.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionChange {
    /// Initial computation after load.
    Loaded,
    /// A single likelihood write; `found` is false if no node had the label.
    Edited { label: String, found: bool },
    /// Leaves restored from the baseline.
    Reset { restored: usize },
}

/// Borrowed view of the session state after a command.
#[derive(Debug, Clone, Copy)]
pub struct SessionUpdate<'a> {
    pub tree: &'a AttackTree,
    pub summary: &'a RiskSummary,
    pub change: &'a SessionChange,
}

/// Live attack tree with its baseline, summary and observers.
pub struct EditSession {
    tree: AttackTree,
    baseline: Baseline,
    config: SessionConfig,
    entry_label: String,
    summary: RiskSummary,
    last_change: SessionChange,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("entry_label", &self.entry_label)
            .field("nodes", &self.tree.len())
            .field("summary", &self.summary)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl EditSession {
    /// Validates `records`, builds the tree, captures the baseline and runs
    /// the initial recompute.
    pub fn load(records: &[NodeRecord], config: SessionConfig) -> Result<Self, TreeError> {
        validate_records(records)?;
        Ok(Self::from_tree(AttackTree::from_records(records), config))
    }

    /// Starts a session on an already built tree without validating it.
    ///
    /// The baseline is captured from `tree` as given, before the initial
    /// recompute.
    pub fn from_tree(tree: AttackTree, config: SessionConfig) -> Self {
        let entry_label = match &config.root_entry {
            RootEntry::Derived => tree.root_label().unwrap_or_default().to_string(),
            RootEntry::Fixed(label) => label.clone(),
        };
        let baseline = Baseline::capture(&tree);

        let mut session = Self {
            tree,
            baseline,
            config,
            entry_label,
            summary: RiskSummary::default(),
            last_change: SessionChange::Loaded,
            observers: Vec::new(),
        };
        session.recompute();
        session
    }

    /// Registers an observer for subsequent commands.
    pub fn subscribe(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    /// Overwrites the likelihood of `label`, then recomputes.
    ///
    /// The target is not checked to be a leaf and `value` is not range
    /// checked. Writing to an internal node is overwritten by the recompute
    /// unless the entry label misses the tree.
    pub fn edit_leaf(&mut self, label: &str, value: f64) -> SessionUpdate<'_> {
        #[cfg(feature = "tracing")]
        let previous = self.tree.find(label).and_then(|n| n.likelihood);

        let found = self.tree.set_likelihood(label, Some(value));

        #[cfg(feature = "tracing")]
        {
            if found {
                tracing::debug!(label, ?previous, value, "edited likelihood");
            } else {
                tracing::warn!(label, value, "edit target not found");
            }
        }

        self.last_change = SessionChange::Edited {
            label: label.to_string(),
            found,
        };
        self.finish_command()
    }

    /// Restores every live leaf to its baseline likelihood, then recomputes.
    pub fn reset(&mut self) -> SessionUpdate<'_> {
        let restored = self.baseline.restore_into(&mut self.tree);

        #[cfg(feature = "tracing")]
        tracing::debug!(restored, "reset leaves to baseline");

        self.last_change = SessionChange::Reset { restored };
        self.finish_command()
    }

    pub fn current_tree(&self) -> &AttackTree {
        &self.tree
    }

    pub fn current_summary(&self) -> &RiskSummary {
        &self.summary
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Label every recompute starts from.
    pub fn entry_label(&self) -> &str {
        &self.entry_label
    }

    /// The state after the most recent command.
    pub fn view(&self) -> SessionUpdate<'_> {
        SessionUpdate {
            tree: &self.tree,
            summary: &self.summary,
            change: &self.last_change,
        }
    }

    fn recompute(&mut self) {
        gate_eval::compute_likelihood(&mut self.tree, &self.entry_label);
        self.summary = summarize_with_threshold(&self.tree, self.config.high_risk_threshold);
    }

    fn finish_command(&mut self) -> SessionUpdate<'_> {
        self.recompute();
        for observer in &self.observers {
            observer.on_update(&self.tree, &self.summary, &self.last_change);
        }
        self.view()
    }
}
