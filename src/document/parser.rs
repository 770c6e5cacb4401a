//! YAML parsing with source position tracking.
//!
//! This module builds [`Node`] trees from YAML text using the marked event
//! stream of `yaml-rust2`. Each event carries a marker for the token that
//! produced it, which becomes the node's line and column.
//!
//! # Example
//!
//! ```
//! use yamlptr::document::parser::parse_yaml;
//!
//! let doc = parse_yaml("a:\n  b:\n    c: 42\n").unwrap();
//! let c = doc.content().get("a").and_then(|a| a.get("b")).and_then(|b| b.get("c")).unwrap();
//! assert_eq!(c.as_scalar(), Some("42"));
//! assert_eq!((c.line(), c.column()), (3, 8));
//! ```

use std::collections::HashMap;

use thiserror::Error;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::TScalarStyle;
use yaml_rust2::scanner::Marker;
use yaml_rust2::ScanError;

use super::node::{MappingEntry, Node, Position};

/// Errors produced while building a document tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The YAML scanner or parser rejected the input.
    #[error("YAML syntax error at {position}: {message}")]
    Syntax { message: String, position: Position },

    /// The input contained no YAML document at all.
    #[error("no YAML document found")]
    Empty,

    /// The event stream did not describe a well-formed tree.
    #[error("invalid YAML structure at {position}: {message}")]
    InvalidStructure { message: String, position: Position },
}

impl From<ScanError> for DocumentError {
    fn from(err: ScanError) -> Self {
        DocumentError::Syntax {
            message: err.info().to_string(),
            position: position_of(err.marker()),
        }
    }
}

/// Parses the first document of a YAML stream.
///
/// The returned node is a document wrapper whose single child is the
/// document's root content. Any further documents are ignored.
///
/// # Errors
///
/// Returns [`DocumentError::Syntax`] for malformed YAML and
/// [`DocumentError::Empty`] when the text holds no document.
pub fn parse_yaml(text: &str) -> Result<Node, DocumentError> {
    parse_impl(text, false)?
        .into_iter()
        .next()
        .ok_or(DocumentError::Empty)
}

/// Parses every document of a (possibly multi-document) YAML stream.
///
/// Each element of the result is a separate document wrapper, in stream
/// order.
pub fn parse_yaml_documents(text: &str) -> Result<Vec<Node>, DocumentError> {
    let documents = parse_impl(text, true)?;
    if documents.is_empty() {
        return Err(DocumentError::Empty);
    }
    Ok(documents)
}

fn parse_impl(text: &str, multi: bool) -> Result<Vec<Node>, DocumentError> {
    let mut parser = Parser::new_from_str(text);
    let mut builder = TreeBuilder::new(text);
    parser.load(&mut builder, multi)?;
    builder.finish()
}

/// yaml-rust2 markers have a 1-based line and a 0-based column.
fn position_of(marker: &Marker) -> Position {
    Position::new(marker.line(), marker.col() + 1)
}

/// A container that is still receiving children.
enum Frame {
    Sequence {
        position: Position,
        anchor: usize,
        items: Vec<Node>,
    },
    Mapping {
        position: Position,
        anchor: usize,
        entries: Vec<MappingEntry>,
        pending_key: Option<Node>,
    },
}

/// Receives marked events and assembles document trees.
struct TreeBuilder<'a> {
    /// Source lines, for locating the `:` of keys with empty values
    lines: Vec<&'a str>,
    stack: Vec<Frame>,
    /// Position of the current document's start event
    document_start: Option<Position>,
    /// Root of the current document once complete
    root: Option<Node>,
    documents: Vec<Node>,
    /// Anchored nodes by anchor id, for alias expansion
    anchors: HashMap<usize, Node>,
    error: Option<DocumentError>,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str) -> Self {
        TreeBuilder {
            lines: source.lines().collect(),
            stack: Vec::new(),
            document_start: None,
            root: None,
            documents: Vec::new(),
            anchors: HashMap::new(),
            error: None,
        }
    }

    fn finish(self) -> Result<Vec<Node>, DocumentError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.documents),
        }
    }

    fn fail(&mut self, message: &str, position: Position) {
        if self.error.is_none() {
            self.error = Some(DocumentError::InvalidStructure {
                message: message.to_string(),
                position,
            });
        }
    }

    /// Position just after the `:` of the pending mapping key.
    ///
    /// yaml-rust2 reports an empty value (`key:`) at the token that follows
    /// it, which is usually on the next line.
    fn empty_value_position(&self) -> Option<Position> {
        let key = match self.stack.last() {
            Some(Frame::Mapping {
                pending_key: Some(key),
                ..
            }) if key.is_scalar() => key,
            _ => return None,
        };
        let line = self.lines.get(key.line().checked_sub(1)?)?;
        let rest: Vec<char> = line.chars().skip(key.column().saturating_sub(1)).collect();
        let offset = colon_offset(&rest)?;
        Some(Position::new(key.line(), key.column() + offset + 1))
    }

    fn remember(&mut self, anchor: usize, node: &Node) {
        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }
    }

    /// Attaches a finished node to its parent, or makes it the document root.
    fn push_complete(&mut self, node: Node) {
        match self.stack.last_mut() {
            None => {
                if self.root.is_some() {
                    self.fail("more than one root node in document", node.position());
                } else {
                    self.root = Some(node);
                }
            }
            Some(Frame::Sequence { items, .. }) => items.push(node),
            Some(Frame::Mapping {
                entries,
                pending_key,
                ..
            }) => match pending_key.take() {
                Some(key) => entries.push(MappingEntry::new(key, node)),
                None => *pending_key = Some(node),
            },
        }
    }

    fn end_sequence(&mut self, position: Position) {
        match self.stack.pop() {
            Some(Frame::Sequence {
                position,
                anchor,
                items,
            }) => {
                let node = Node::sequence(items, position);
                self.remember(anchor, &node);
                self.push_complete(node);
            }
            _ => self.fail("sequence end without matching start", position),
        }
    }

    fn end_mapping(&mut self, position: Position) {
        match self.stack.pop() {
            Some(Frame::Mapping {
                position,
                anchor,
                entries,
                pending_key,
            }) => {
                if let Some(key) = pending_key {
                    self.fail("mapping key without value", key.position());
                    return;
                }
                let node = Node::mapping(entries, position);
                self.remember(anchor, &node);
                self.push_complete(node);
            }
            _ => self.fail("mapping end without matching start", position),
        }
    }

    fn end_document(&mut self, position: Position) {
        if !self.stack.is_empty() {
            self.fail("document ended inside an open collection", position);
            return;
        }
        let start = self.document_start.take().unwrap_or(position);
        match self.root.take() {
            Some(root) => self.documents.push(Node::document(root, start)),
            None => self.fail("document has no content", start),
        }
    }
}

/// Offset of the `:` ending a key that starts at `text[0]`.
fn colon_offset(text: &[char]) -> Option<usize> {
    let mut i = match text.first() {
        Some(&quote @ ('"' | '\'')) => closing_quote(text, quote)? + 1,
        _ => 0,
    };
    while i < text.len() {
        if text[i] == ':' {
            let separator = text
                .get(i + 1)
                .map_or(true, |c| c.is_whitespace() || matches!(c, ',' | '}' | ']'));
            if separator {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}

/// Index of the quote closing a quoted scalar that opens at `text[0]`.
fn closing_quote(text: &[char], quote: char) -> Option<usize> {
    let mut i = 1;
    while i < text.len() {
        match text[i] {
            '\\' if quote == '"' => i += 2,
            c if c == quote => {
                // '' is an escaped quote inside a single-quoted scalar
                if quote == '\'' && text.get(i + 1) == Some(&'\'') {
                    i += 2;
                } else {
                    return Some(i);
                }
            }
            _ => i += 1,
        }
    }
    None
}

impl MarkedEventReceiver for TreeBuilder<'_> {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        if self.error.is_some() {
            return;
        }
        let position = position_of(&marker);

        match ev {
            Event::DocumentStart => {
                self.document_start = Some(position);
                self.anchors.clear();
            }
            Event::DocumentEnd => self.end_document(position),
            Event::Scalar(text, style, anchor, _tag) => {
                let position = if text.is_empty() && style == TScalarStyle::Plain {
                    self.empty_value_position().unwrap_or(position)
                } else {
                    position
                };
                let node = Node::scalar(text, position);
                self.remember(anchor, &node);
                self.push_complete(node);
            }
            Event::SequenceStart(anchor, _tag) => self.stack.push(Frame::Sequence {
                position,
                anchor,
                items: Vec::new(),
            }),
            Event::SequenceEnd => self.end_sequence(position),
            Event::MappingStart(anchor, _tag) => self.stack.push(Frame::Mapping {
                position,
                anchor,
                entries: Vec::new(),
                pending_key: None,
            }),
            Event::MappingEnd => self.end_mapping(position),
            Event::Alias(anchor) => match self.anchors.get(&anchor) {
                // The copy keeps the anchored node's positions, so matches
                // through an alias point at the definition.
                Some(node) => {
                    let node = node.clone();
                    self.push_complete(node);
                }
                None => self.fail("alias refers to an unknown anchor", position),
            },
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::NodeKind;

    #[test]
    fn test_parse_wraps_root_in_document() {
        let doc = parse_yaml("name: test").unwrap();
        assert_eq!(doc.kind(), NodeKind::Document);
        assert_eq!(doc.content().kind(), NodeKind::Mapping);
    }

    #[test]
    fn test_scalars_keep_source_text() {
        let doc = parse_yaml("count: 42\nratio: 1.50\nflag: yes\n").unwrap();
        let root = doc.content();
        assert_eq!(root.get("count").and_then(Node::as_scalar), Some("42"));
        assert_eq!(root.get("ratio").and_then(Node::as_scalar), Some("1.50"));
        assert_eq!(root.get("flag").and_then(Node::as_scalar), Some("yes"));
    }

    #[test]
    fn test_positions_are_one_based() {
        let doc = parse_yaml("\na:\n  b:\n    c: 42\nd:\n- e\n- f\n").unwrap();
        let root = doc.content();
        let c = root.get("a").and_then(|a| a.get("b")).and_then(|b| b.get("c")).unwrap();
        assert_eq!(c.position(), Position::new(4, 8));
        let e = root.get("d").and_then(|d| d.get_index(0)).unwrap();
        assert_eq!(e.position(), Position::new(6, 3));
    }

    #[test]
    fn test_key_positions_are_recorded() {
        let doc = parse_yaml("first: 1\nsecond: 2\n").unwrap();
        let entries = doc.content().as_mapping().unwrap();
        assert_eq!(entries[1].key_str(), Some("second"));
        assert_eq!(entries[1].key.position(), Position::new(2, 1));
        assert_eq!(entries[1].value.position(), Position::new(2, 9));
    }

    #[test]
    fn test_empty_value_sits_after_colon() {
        let doc = parse_yaml("a:\nb: ''\n").unwrap();
        let a = doc.content().get("a").unwrap();
        assert_eq!(a.as_scalar(), Some(""));
        assert_eq!(a.position(), Position::new(1, 3));
        // Quoted empty strings keep their own position
        let b = doc.content().get("b").unwrap();
        assert_eq!(b.position(), Position::new(2, 4));
    }

    #[test]
    fn test_empty_value_after_quoted_key() {
        let doc = parse_yaml("top:\n  \"a: b\":\n  'it''s':\nlast: 1\n").unwrap();
        let top = doc.content().get("top").unwrap();
        assert_eq!(top.get("a: b").unwrap().position(), Position::new(2, 10));
        assert_eq!(top.get("it's").unwrap().position(), Position::new(3, 11));
    }

    #[test]
    fn test_colon_offset() {
        let chars = |s: &str| s.chars().collect::<Vec<_>>();
        assert_eq!(colon_offset(&chars("key:")), Some(3));
        assert_eq!(colon_offset(&chars("url: http://x")), Some(3));
        assert_eq!(colon_offset(&chars("a:b: c")), Some(3));
        assert_eq!(colon_offset(&chars("\"x\\\": y\" :")), Some(9));
        assert_eq!(colon_offset(&chars("no colon")), None);
    }

    #[test]
    fn test_alias_copies_anchored_node() {
        let doc = parse_yaml("base: &b\n  image: nginx\nother: *b\n").unwrap();
        let root = doc.content();
        let image = root.get("other").and_then(|o| o.get("image")).unwrap();
        assert_eq!(image.as_scalar(), Some("nginx"));
        assert_eq!(image.line(), 2);
    }

    #[test]
    fn test_multiple_documents() {
        let docs = parse_yaml_documents("a: 1\n---\na: 2\n").unwrap();
        assert_eq!(docs.len(), 2);
        let second = docs[1].content().get("a").unwrap();
        assert_eq!(second.as_scalar(), Some("2"));
        assert_eq!(second.line(), 3);
    }

    #[test]
    fn test_first_document_only() {
        let doc = parse_yaml("a: 1\n---\na: 2\n").unwrap();
        assert_eq!(doc.content().get("a").and_then(Node::as_scalar), Some("1"));
    }

    #[test]
    fn test_empty_input_fails() {
        assert_eq!(parse_yaml(""), Err(DocumentError::Empty));
        assert_eq!(parse_yaml_documents(""), Err(DocumentError::Empty));
    }

    #[test]
    fn test_syntax_error_has_position() {
        let err = parse_yaml("a: [1, 2\n").unwrap_err();
        assert!(matches!(err, DocumentError::Syntax { .. }));
    }
}
