use attacktree::engine::gate_eval::{compute_likelihood, evaluate};
use attacktree::{AttackTree, NodeRecord};

fn basic_tree() -> AttackTree {
    AttackTree::from_records(&[
        NodeRecord::root("Root", "OR"),
        NodeRecord::leaf("A", "Root", 60.0),
        NodeRecord::leaf("B", "Root", 40.0),
    ])
}

fn and_tree() -> AttackTree {
    AttackTree::from_records(&[
        NodeRecord::root("Root", "AND"),
        NodeRecord::leaf("A", "Root", 50.0),
        NodeRecord::leaf("B", "Root", 80.0),
    ])
}

fn nested_tree() -> AttackTree {
    AttackTree::from_records(&[
        NodeRecord::root("Root", "OR"),
        NodeRecord::branch("Mid", "Root", "AND"),
        NodeRecord::leaf("Leaf1", "Mid", 70.0),
        NodeRecord::leaf("Leaf2", "Mid", 60.0),
    ])
}

#[test]
fn children_and_leaf_queries() {
    let tree = basic_tree();
    assert!(tree.is_leaf("A"));
    assert!(!tree.is_leaf("Root"));

    let children: Vec<&str> = tree.children_of("Root").map(|n| n.label.as_str()).collect();
    assert_eq!(children, vec!["A", "B"]);
}

#[test]
fn or_gate_is_noisy_or() {
    let mut tree = basic_tree();
    assert_eq!(compute_likelihood(&mut tree, "Root"), 76.0);
}

#[test]
fn and_gate_is_product() {
    let mut tree = and_tree();
    assert_eq!(compute_likelihood(&mut tree, "Root"), 40.0);
}

#[test]
fn nested_gates() {
    let mut tree = nested_tree();
    assert_eq!(compute_likelihood(&mut tree, "Root"), 42.0);
    assert_eq!(tree.likelihood_of("Mid"), 42.0);
}

#[test]
fn single_node_tree_returns_stored_value() {
    let mut tree = AttackTree::from_records(&[NodeRecord::leaf("Single", "", 75.0)]);
    assert_eq!(compute_likelihood(&mut tree, "Single"), 75.0);
}

#[test]
fn missing_node_is_zero() {
    let mut tree = basic_tree();
    assert_eq!(compute_likelihood(&mut tree, "NonExistent"), 0.0);
}

#[test]
fn repeated_computation_is_idempotent() {
    let mut tree = nested_tree();
    let first = compute_likelihood(&mut tree, "Root");
    let snapshot = tree.nodes().to_vec();
    let second = compute_likelihood(&mut tree, "Root");

    assert_eq!(first, second);
    assert_eq!(tree.nodes(), snapshot.as_slice());
}

#[test]
fn gate_strings_are_case_insensitive() {
    let mut tree = AttackTree::from_records(&[
        NodeRecord::root("Root", "and"),
        NodeRecord::leaf("A", "Root", 50.0),
        NodeRecord::leaf("B", "Root", 80.0),
    ]);
    assert_eq!(compute_likelihood(&mut tree, "Root"), 40.0);
}

#[test]
fn unrecognized_gate_defaults_to_or() {
    let mut tree = AttackTree::from_records(&[
        NodeRecord::root("Root", "XOR"),
        NodeRecord::leaf("A", "Root", 60.0),
        NodeRecord::leaf("B", "Root", 40.0),
    ]);
    assert_eq!(compute_likelihood(&mut tree, "Root"), 76.0);
}

#[test]
fn stale_internal_input_values_are_overwritten() {
    let mut records = vec![
        NodeRecord::root("Root", "OR"),
        NodeRecord::leaf("A", "Root", 60.0),
        NodeRecord::leaf("B", "Root", 40.0),
    ];
    records[0].likelihood = Some(3.0);
    let mut tree = AttackTree::from_records(&records);

    assert_eq!(compute_likelihood(&mut tree, "Root"), 76.0);
    assert_eq!(tree.find("Root").unwrap().likelihood, Some(76.0));
}

#[test]
fn parents_combine_rounded_child_values() {
    // Mid = 0.33 * 0.33 = 0.1089, stored as 10.9 and fed to Root as 0.109
    let mut tree = AttackTree::from_records(&[
        NodeRecord::root("Root", "OR"),
        NodeRecord::branch("Mid", "Root", "AND"),
        NodeRecord::leaf("L1", "Mid", 33.0),
        NodeRecord::leaf("L2", "Mid", 33.0),
        NodeRecord::leaf("L3", "Root", 50.0),
    ]);
    let eval = evaluate(&tree, "Root");

    assert_eq!(eval.derived_value("Mid"), Some(10.9));
    assert_eq!(compute_likelihood(&mut tree, "Root"), eval.value);
}

#[test]
fn deep_chain_does_not_recurse() {
    let mut records = vec![NodeRecord::root("N0", "OR")];
    for i in 1..20_000 {
        records.push(NodeRecord::branch(format!("N{}", i), format!("N{}", i - 1), "OR"));
    }
    records.push(NodeRecord::leaf("Leaf", "N19999", 37.0));
    let mut tree = AttackTree::from_records(&records);

    assert_eq!(compute_likelihood(&mut tree, "N0"), 37.0);
}

fn two_leaf_tree(gate: &str, a: f64, b: f64) -> AttackTree {
    AttackTree::from_records(&[
        NodeRecord::root("Root", gate),
        NodeRecord::leaf("A", "Root", a),
        NodeRecord::leaf("B", "Root", b),
    ])
}

#[test]
fn rounding_uses_the_stored_product() {
    let cases = [
        ("AND", 1.0, 15.0, 0.1),
        ("AND", 1.0, 35.0, 0.3),
        ("OR", 1.0, 75.0, 75.2),
        ("OR", 1.0, 65.0, 65.3),
    ];
    for (gate, a, b, expected) in cases {
        let mut tree = two_leaf_tree(gate, a, b);
        assert_eq!(
            compute_likelihood(&mut tree, "Root"),
            expected,
            "{} over {} and {}",
            gate,
            a,
            b
        );
    }
}

#[test]
fn rounded_children_feed_their_parent() {
    // Mid rounds to 0.1, so Root sees 0.001 rather than 0.0015
    let mut tree = AttackTree::from_records(&[
        NodeRecord::root("Root", "OR"),
        NodeRecord::branch("Mid", "Root", "AND"),
        NodeRecord::leaf("L1", "Mid", 1.0),
        NodeRecord::leaf("L2", "Mid", 15.0),
        NodeRecord::leaf("L3", "Root", 50.0),
    ]);

    assert_eq!(compute_likelihood(&mut tree, "Root"), 50.0);
    assert_eq!(tree.likelihood_of("Mid"), 0.1);
}
