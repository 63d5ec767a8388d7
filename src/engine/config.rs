//! Session configuration.

/// How the recompute entry label is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RootEntry {
    /// Use the label of the loaded tree's first root node.
    #[default]
    Derived,
    /// Always evaluate from this label, even if the tree has no such node.
    ///
    /// A label that does not match the tree's root leaves every internal
    /// likelihood stale after edits.
    Fixed(String),
}

impl RootEntry {
    /// Entry label used by legacy tree files.
    pub const LEGACY_LABEL: &'static str = "Root Attack";

    /// The fixed legacy entry label.
    pub fn legacy() -> Self {
        RootEntry::Fixed(Self::LEGACY_LABEL.to_string())
    }
}

/// Default threshold (inclusive) at which a node counts as high risk.
pub const DEFAULT_HIGH_RISK_THRESHOLD: f64 = 75.0;

/// Tunables for an [`EditSession`](crate::engine::session::EditSession).
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub root_entry: RootEntry,
    pub high_risk_threshold: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            root_entry: RootEntry::Derived,
            high_risk_threshold: DEFAULT_HIGH_RISK_THRESHOLD,
        }
    }
}

impl SessionConfig {
    pub fn with_root_entry(mut self, root_entry: RootEntry) -> Self {
        self.root_entry = root_entry;
        self
    }

    pub fn with_high_risk_threshold(mut self, threshold: f64) -> Self {
        self.high_risk_threshold = threshold;
        self
    }
}
