//! Tests for building position-annotated trees from YAML text.

use yamlptr::document::node::{Node, NodeKind, NodeValue, Position};
use yamlptr::document::parser::{parse_yaml, parse_yaml_documents, DocumentError};

#[test]
fn test_document_wraps_single_root() {
    let doc = parse_yaml("name: Test\ncount: 42\n").expect("Failed to parse YAML");

    match doc.value() {
        NodeValue::Document(root) => {
            assert_eq!(root.kind(), NodeKind::Mapping);
            assert_eq!(root.len(), 2);
        }
        other => panic!("expected document, got {:?}", other),
    }
}

#[test]
fn test_mapping_preserves_declared_order() {
    let doc = parse_yaml("zeta: 1\nalpha: 2\nmid: 3\n").unwrap();
    let keys: Vec<&str> = doc
        .content()
        .as_mapping()
        .unwrap()
        .iter()
        .filter_map(|entry| entry.key_str())
        .collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_sequence_positions() {
    let doc = parse_yaml("- Alice\n- Bob\n- Carol\n").unwrap();
    let items = doc.content().as_sequence().unwrap();
    let positions: Vec<Position> = items.iter().map(Node::position).collect();
    assert_eq!(
        positions,
        vec![Position::new(1, 3), Position::new(2, 3), Position::new(3, 3)]
    );
}

#[test]
fn test_flow_collection_positions() {
    let doc = parse_yaml("point: {x: 1, y: 22}\n").unwrap();
    let y = doc.content().get("point").and_then(|p| p.get("y")).unwrap();
    assert_eq!(y.as_scalar(), Some("22"));
    assert_eq!(y.position(), Position::new(1, 18));
}

#[test]
fn test_quoted_scalar_text_is_unquoted() {
    let doc = parse_yaml("a: \"quoted value\"\nb: 'single'\n").unwrap();
    let root = doc.content();
    assert_eq!(root.get("a").and_then(Node::as_scalar), Some("quoted value"));
    assert_eq!(root.get("b").and_then(Node::as_scalar), Some("single"));
    // Position is that of the opening quote.
    assert_eq!(root.get("a").map(Node::column), Some(4));
}

#[test]
fn test_block_scalar_text() {
    let doc = parse_yaml("script: |\n  echo one\n  echo two\n").unwrap();
    let script = doc.content().get("script").and_then(Node::as_scalar);
    assert_eq!(script, Some("echo one\necho two\n"));
}

#[test]
fn test_multi_document_stream() {
    let docs = parse_yaml_documents("kind: A\n---\nkind: B\n---\nkind: C\n").unwrap();
    let kinds: Vec<&str> = docs
        .iter()
        .filter_map(|d| d.content().get("kind").and_then(Node::as_scalar))
        .collect();
    assert_eq!(kinds, vec!["A", "B", "C"]);
    assert!(docs.iter().all(|d| d.kind() == NodeKind::Document));
}

#[test]
fn test_invalid_yaml_reports_syntax_error() {
    let err = parse_yaml("key: [unclosed\n").unwrap_err();
    match err {
        DocumentError::Syntax { position, .. } => assert!(position.line >= 1),
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_comment_only_input_is_empty() {
    assert_eq!(parse_yaml("# nothing here\n"), Err(DocumentError::Empty));
}
