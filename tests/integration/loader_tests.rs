use attacktree::engine::errors::ValidationKind;
use attacktree::frontend::parse_records_json;
use attacktree::{load_tree_json, Gate, TreeError};

const TREE_JSON: &str = r#"[
    {"label": "Root Attack", "parent": "", "gate": "OR"},
    {"label": "Steal Credentials", "parent": "Root Attack", "gate": "and"},
    {"label": "Phishing Email", "parent": "Steal Credentials", "likelihood": 70},
    {"label": "Bypass MFA", "parent": "Steal Credentials", "likelihood": 30},
    {"label": "Exploit Server", "parent": "Root Attack", "gate": "Or"},
    {"label": "Unpatched CVE", "parent": "Exploit Server", "likelihood": 45},
    {"label": "Default Password", "parent": "Exploit Server"}
]"#;

#[test]
fn loads_json_tree() {
    let tree = load_tree_json(TREE_JSON).unwrap();

    assert_eq!(tree.len(), 7);
    assert_eq!(tree.root_label(), Some("Root Attack"));
    assert_eq!(tree.find("Steal Credentials").unwrap().gate, Gate::And);
    assert_eq!(tree.find("Exploit Server").unwrap().gate, Gate::Or);
    assert_eq!(tree.find("Default Password").unwrap().likelihood, None);
}

#[test]
fn records_round_trip_through_tree() {
    let records = parse_records_json(TREE_JSON).unwrap();
    let tree = attacktree::load_tree(&records).unwrap();
    let again = attacktree::load_tree(&tree.to_records()).unwrap();
    assert_eq!(again.nodes(), tree.nodes());
}

#[test]
fn rejects_duplicate_labels() {
    let json = r#"[
        {"label": "Root", "parent": ""},
        {"label": "A", "parent": "Root", "likelihood": 1},
        {"label": "A", "parent": "Root", "likelihood": 2}
    ]"#;
    let err = load_tree_json(json).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::DuplicateLabel));
}

#[test]
fn rejects_out_of_range_likelihood() {
    let json = r#"[
        {"label": "Root", "parent": ""},
        {"label": "A", "parent": "Root", "likelihood": 140}
    ]"#;
    let err = load_tree_json(json).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::LikelihoodOutOfRange));
    assert!(err.to_string().contains("[node 'A']"));
}

#[test]
fn rejects_wrong_field_types() {
    let json = r#"[{"label": "Root", "parent": "", "likelihood": "high"}]"#;
    assert!(matches!(load_tree_json(json), Err(TreeError::ParseError(_))));
}

#[test]
fn rejects_empty_label() {
    let json = r#"[
        {"label": "Root", "parent": ""},
        {"label": "", "parent": "Root", "likelihood": 40}
    ]"#;
    let err = load_tree_json(json).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::EmptyLabel));
}
