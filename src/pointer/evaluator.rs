use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::ast::{Constraints, Pointer, Segment};
use crate::document::node::{Node, NodeValue};

/// A scalar reached by a pointer, with the position of its first character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolved {
    pub value: String,
    pub line: usize,
    pub column: usize,
}

impl Resolved {
    /// Builds a result from a scalar node; `None` for any other kind.
    pub fn from_node(node: &Node) -> Option<Self> {
        node.as_scalar().map(|value| Resolved {
            value: value.to_string(),
            line: node.line(),
            column: node.column(),
        })
    }
}

/// Outcome of walking a pointer's segments over a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Walk<'a> {
    /// Every node left after the last segment, in document order.
    Reached(Vec<&'a Node>),
    /// The segment at this index left no candidate nodes.
    Stalled { segment: usize },
}

impl<'a> Walk<'a> {
    pub fn is_stalled(&self) -> bool {
        matches!(self, Walk::Stalled { .. })
    }

    /// The reached nodes; empty if the walk stalled.
    pub fn into_nodes(self) -> Vec<&'a Node> {
        match self {
            Walk::Reached(nodes) => nodes,
            Walk::Stalled { .. } => Vec::new(),
        }
    }

    /// Results for the reached scalars. Mappings and sequences are skipped.
    pub fn scalars(&self) -> Vec<Resolved> {
        match self {
            Walk::Reached(nodes) => nodes.iter().filter_map(|n| Resolved::from_node(n)).collect(),
            Walk::Stalled { .. } => Vec::new(),
        }
    }
}

pub struct Evaluator<'a> {
    root: &'a Node,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator over `root`. A document wrapper is unwrapped to
    /// its content before the first segment is applied.
    pub fn new(root: &'a Node) -> Self {
        Evaluator {
            root: root.content(),
        }
    }

    /// Applies segments left to right, narrowing (or fanning out) the set
    /// of current nodes at each step.
    pub fn evaluate(&self, segments: &[Segment]) -> Walk<'a> {
        let mut current: Vec<&'a Node> = vec![self.root];

        for (index, segment) in segments.iter().enumerate() {
            let mut next = Vec::new();
            for &node in &current {
                self.evaluate_segment(node, segment, &mut next);
            }
            trace!(%segment, from = current.len(), to = next.len(), "applied segment");

            if next.is_empty() {
                debug!(%segment, index, "pointer walk stalled");
                return Walk::Stalled { segment: index };
            }
            current = next;
        }

        Walk::Reached(current)
    }

    fn evaluate_segment(&self, node: &'a Node, segment: &Segment, next: &mut Vec<&'a Node>) {
        match segment {
            Segment::Key(name) => next.extend(node.get(name)),
            Segment::Index(index) => match node.value() {
                NodeValue::Sequence(items) => next.extend(items.get(*index)),
                NodeValue::Mapping(_) => next.extend(node.get(&index.to_string())),
                NodeValue::Scalar(_) | NodeValue::Document(_) => {}
            },
            Segment::Match(constraints) => {
                if let NodeValue::Sequence(items) = node.value() {
                    next.extend(items.iter().filter(|item| satisfies(item, constraints)));
                }
            }
        }
    }
}

/// True if `item` satisfies every constraint. Empty constraints accept any
/// element; otherwise the element must be a mapping whose scalar fields
/// equal the constraint values as text.
fn satisfies(item: &Node, constraints: &Constraints) -> bool {
    if constraints.is_empty() {
        return true;
    }
    if item.as_mapping().is_none() {
        return false;
    }
    constraints.iter().all(|(field, expected)| {
        item.get(field)
            .and_then(Node::as_scalar)
            .is_some_and(|actual| actual == expected.as_text())
    })
}

impl Pointer {
    /// Walks this pointer over `root`.
    pub fn resolve<'a>(&self, root: &'a Node) -> Walk<'a> {
        Evaluator::new(root).evaluate(self.segments())
    }
}
