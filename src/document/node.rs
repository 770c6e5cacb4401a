//! YAML node representation with source positions.
//!
//! Every node records the line and column of its first character in the
//! source it was built from. Nodes are immutable once built; the pointer
//! evaluator only ever borrows them.
//!
//! # Example
//!
//! ```
//! use yamlptr::document::node::{MappingEntry, Node, Position};
//!
//! let name = Node::scalar("app", Position::new(1, 7));
//! let root = Node::mapping(
//!     vec![MappingEntry::new(Node::scalar("name", Position::new(1, 1)), name)],
//!     Position::new(1, 1),
//! );
//! let doc = Node::document(root, Position::new(1, 1));
//!
//! let content = doc.content();
//! assert_eq!(content.get("name").and_then(Node::as_scalar), Some("app"));
//! ```

use std::fmt;

/// A 1-based line/column location in the original source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The kind of a node, without its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Scalar,
    Sequence,
    Mapping,
    Document,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Scalar => "scalar",
            NodeKind::Sequence => "sequence",
            NodeKind::Mapping => "mapping",
            NodeKind::Document => "document",
        };
        f.write_str(name)
    }
}

/// One `key: value` pair of a mapping.
///
/// The key is a full node so its own position is available. Keys are
/// usually scalars, but YAML allows complex keys; those never match a
/// pointer segment.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingEntry {
    pub key: Node,
    pub value: Node,
}

impl MappingEntry {
    pub fn new(key: Node, value: Node) -> Self {
        Self { key, value }
    }

    /// Returns the key text if the key is a scalar.
    pub fn key_str(&self) -> Option<&str> {
        self.key.as_scalar()
    }
}

/// The contents of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    /// Scalar text exactly as written (after YAML unquoting), with no type coercion
    Scalar(String),
    /// Sequence elements in declared order
    Sequence(Vec<Node>),
    /// Mapping entries in declared order
    Mapping(Vec<MappingEntry>),
    /// Wrapper around the single root of a YAML document
    Document(Box<Node>),
}

/// A YAML node together with the position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    value: NodeValue,
    position: Position,
}

impl Node {
    pub fn new(value: NodeValue, position: Position) -> Self {
        Self { value, position }
    }

    pub fn scalar(text: impl Into<String>, position: Position) -> Self {
        Self::new(NodeValue::Scalar(text.into()), position)
    }

    pub fn sequence(items: Vec<Node>, position: Position) -> Self {
        Self::new(NodeValue::Sequence(items), position)
    }

    pub fn mapping(entries: Vec<MappingEntry>, position: Position) -> Self {
        Self::new(NodeValue::Mapping(entries), position)
    }

    pub fn document(root: Node, position: Position) -> Self {
        Self::new(NodeValue::Document(Box::new(root)), position)
    }

    pub fn value(&self) -> &NodeValue {
        &self.value
    }

    pub fn kind(&self) -> NodeKind {
        match self.value {
            NodeValue::Scalar(_) => NodeKind::Scalar,
            NodeValue::Sequence(_) => NodeKind::Sequence,
            NodeValue::Mapping(_) => NodeKind::Mapping,
            NodeValue::Document(_) => NodeKind::Document,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.value, NodeValue::Scalar(_))
    }

    /// Returns the scalar text, or `None` for containers.
    pub fn as_scalar(&self) -> Option<&str> {
        match &self.value {
            NodeValue::Scalar(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match &self.value {
            NodeValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&[MappingEntry]> {
        match &self.value {
            NodeValue::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the logical root of a document, or the node itself for
    /// anything that is not a document wrapper.
    ///
    /// Nested wrappers are unwrapped all the way down.
    pub fn content(&self) -> &Node {
        let mut node = self;
        while let NodeValue::Document(root) = &node.value {
            node = root;
        }
        node
    }

    /// Looks up a mapping value by its scalar key.
    ///
    /// Returns the first entry with that key; `None` if this is not a
    /// mapping or the key is absent.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping()?
            .iter()
            .find(|entry| entry.key_str() == Some(key))
            .map(|entry| &entry.value)
    }

    /// Returns a sequence element by position.
    pub fn get_index(&self, index: usize) -> Option<&Node> {
        self.as_sequence()?.get(index)
    }

    /// Number of direct children (elements, entries, or 1 for a document).
    pub fn len(&self) -> usize {
        match &self.value {
            NodeValue::Scalar(_) => 0,
            NodeValue::Sequence(items) => items.len(),
            NodeValue::Mapping(entries) => entries.len(),
            NodeValue::Document(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: usize, column: usize) -> Position {
        Position::new(line, column)
    }

    fn entry(key: &str, value: Node) -> MappingEntry {
        MappingEntry::new(Node::scalar(key, at(1, 1)), value)
    }

    #[test]
    fn test_kind_dispatch() {
        assert_eq!(Node::scalar("x", at(1, 1)).kind(), NodeKind::Scalar);
        assert_eq!(Node::sequence(vec![], at(1, 1)).kind(), NodeKind::Sequence);
        assert_eq!(Node::mapping(vec![], at(1, 1)).kind(), NodeKind::Mapping);
        let doc = Node::document(Node::scalar("x", at(1, 1)), at(1, 1));
        assert_eq!(doc.kind(), NodeKind::Document);
    }

    #[test]
    fn test_get_returns_first_matching_key() {
        let map = Node::mapping(
            vec![
                entry("a", Node::scalar("1", at(1, 4))),
                entry("a", Node::scalar("2", at(2, 4))),
            ],
            at(1, 1),
        );
        assert_eq!(map.get("a").and_then(Node::as_scalar), Some("1"));
        assert!(map.get("b").is_none());
    }

    #[test]
    fn test_complex_key_never_matches() {
        let complex_key = Node::sequence(vec![Node::scalar("a", at(1, 4))], at(1, 3));
        let map = Node::mapping(
            vec![MappingEntry::new(complex_key, Node::scalar("v", at(1, 9)))],
            at(1, 1),
        );
        assert!(map.get("a").is_none());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_content_unwraps_documents() {
        let root = Node::sequence(vec![Node::scalar("e", at(2, 3))], at(2, 1));
        let doc = Node::document(root.clone(), at(1, 1));
        assert_eq!(doc.content(), &root);
        assert_eq!(root.content(), &root);
        assert_eq!(doc.content().get_index(0).map(Node::line), Some(2));
    }

    #[test]
    fn test_position_display() {
        assert_eq!(at(4, 8).to_string(), "4:8");
    }
}
