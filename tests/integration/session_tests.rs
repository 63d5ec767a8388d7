use std::cell::Cell;
use std::rc::Rc;

use attacktree::metrics::RiskSummary;
use attacktree::render::SunburstSeries;
use attacktree::{
    AttackTree, EditSession, NodeRecord, RootEntry, SessionChange, SessionConfig, SessionObserver,
};

fn records() -> Vec<NodeRecord> {
    vec![
        NodeRecord::root("Root", "OR"),
        NodeRecord::branch("BranchA", "Root", "OR"),
        NodeRecord::leaf("Leaf1", "BranchA", 60.0),
        NodeRecord::leaf("Leaf2", "BranchA", 80.0),
        NodeRecord::branch("BranchB", "Root", "AND"),
        NodeRecord::leaf("Leaf3", "BranchB", 90.0),
        NodeRecord::leaf("Leaf4", "BranchB", 50.0),
    ]
}

#[test]
fn session_commands_cover_load_edit_reset() {
    let mut session = EditSession::load(&records(), SessionConfig::default()).unwrap();
    assert_eq!(session.current_tree().likelihood_of("BranchA"), 92.0);
    assert_eq!(session.current_tree().likelihood_of("BranchB"), 45.0);
    assert_eq!(session.current_tree().likelihood_of("Root"), 95.6);

    let update = session.edit_leaf("Leaf4", 100.0);
    assert_eq!(update.tree.likelihood_of("BranchB"), 90.0);
    assert_eq!(update.tree.likelihood_of("Root"), 99.2);

    let update = session.reset();
    assert_eq!(update.tree.likelihood_of("Leaf4"), 50.0);
    assert_eq!(update.tree.likelihood_of("Root"), 95.6);
}

#[test]
fn reset_matches_fresh_load() {
    let fresh = EditSession::load(&records(), SessionConfig::default()).unwrap();
    let mut session = EditSession::load(&records(), SessionConfig::default()).unwrap();

    for (label, value) in [("Leaf1", 0.0), ("Leaf2", 12.0), ("Leaf3", 99.0), ("Leaf1", 33.0)] {
        session.edit_leaf(label, value);
    }
    session.reset();

    assert_eq!(session.current_tree().nodes(), fresh.current_tree().nodes());
    assert_eq!(session.current_summary(), fresh.current_summary());
}

#[test]
fn edit_on_internal_node_is_overwritten_by_recompute() {
    let mut session = EditSession::load(&records(), SessionConfig::default()).unwrap();
    let update = session.edit_leaf("BranchA", 1.0);

    assert_eq!(update.tree.likelihood_of("BranchA"), 92.0);
}

#[test]
fn out_of_range_edit_is_not_clamped() {
    let mut session = EditSession::load(&records(), SessionConfig::default()).unwrap();
    let update = session.edit_leaf("Leaf1", 150.0);
    assert_eq!(update.tree.likelihood_of("Leaf1"), 150.0);
}

#[test]
fn legacy_entry_label_leaves_branches_stale() {
    let config = SessionConfig::default().with_root_entry(RootEntry::legacy());
    let mut session = EditSession::load(&records(), config).unwrap();

    assert_eq!(session.entry_label(), "Root Attack");
    assert_eq!(session.current_tree().find("BranchA").unwrap().likelihood, None);

    let update = session.edit_leaf("Leaf2", 95.0);
    assert_eq!(update.tree.likelihood_of("Leaf2"), 95.0);
    assert_eq!(update.tree.find("Root").unwrap().likelihood, None);
    // Leaf-only statistics still see the edit.
    assert_eq!(update.summary.highest.as_ref().unwrap().label, "Leaf2");
}

#[test]
fn fixed_entry_matching_root_behaves_like_derived() {
    let derived = EditSession::load(&records(), SessionConfig::default()).unwrap();
    let fixed = EditSession::load(
        &records(),
        SessionConfig::default().with_root_entry(RootEntry::Fixed("Root".into())),
    )
    .unwrap();

    assert_eq!(derived.current_tree().nodes(), fixed.current_tree().nodes());
}

struct CountingObserver {
    calls: Rc<Cell<usize>>,
    last_root: Rc<Cell<f64>>,
}

impl SessionObserver for CountingObserver {
    fn on_update(&self, tree: &AttackTree, _summary: &RiskSummary, _change: &SessionChange) {
        self.calls.set(self.calls.get() + 1);
        self.last_root.set(tree.likelihood_of("Root"));
    }
}

#[test]
fn observers_receive_recomputed_state() {
    let calls = Rc::new(Cell::new(0));
    let last_root = Rc::new(Cell::new(0.0));
    let mut session = EditSession::load(&records(), SessionConfig::default()).unwrap();
    session.subscribe(Box::new(CountingObserver {
        calls: Rc::clone(&calls),
        last_root: Rc::clone(&last_root),
    }));

    session.edit_leaf("Leaf4", 100.0);
    assert_eq!(calls.get(), 1);
    assert_eq!(last_root.get(), 99.2);

    session.reset();
    assert_eq!(calls.get(), 2);
    assert_eq!(last_root.get(), 95.6);
}

#[test]
fn sunburst_tracks_session_state() {
    let mut session = EditSession::load(&records(), SessionConfig::default()).unwrap();
    let update = session.edit_leaf("Leaf1", 0.0);
    let series = SunburstSeries::from_tree(update.tree);

    assert_eq!(series.labels[1], "BranchA");
    assert_eq!(series.values[1], 80.0);
    assert_eq!(series.values[2], 0.0);
}
