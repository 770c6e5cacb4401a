//! Parsed pointer types.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;

use super::error::PointerError;
use super::parser::Parser;

/// A literal value a mapping field must equal inside a `~{...}` segment.
///
/// Comparison is textual: the scalar's source text is compared with
/// [`Literal::as_text`], so `{"replicas": 1}` matches `replicas: 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl Literal {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Literal::String(s) => Cow::Borrowed(s),
            Literal::Number(n) => Cow::Owned(n.to_string()),
            Literal::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// Field constraints of an extension match, in the order they were written.
pub type Constraints = IndexMap<String, Literal>;

/// A single step of a pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Mapping entry by exact key
    Key(String),
    /// Sequence element by position; against a mapping it is looked up as
    /// the key spelled by its decimal digits
    Index(usize),
    /// Every sequence element whose fields equal all constraints; empty
    /// constraints select every element
    Match(Constraints),
}

impl Segment {
    pub fn is_match(&self) -> bool {
        matches!(self, Segment::Match(_))
    }
}

/// Writes the segment in pointer syntax with RFC6901 escaping.
///
/// Parsing the output gives back the same segment, except for a key whose
/// unescaped text starts with `~{` and ends with `}`: no pointer can spell
/// such a key, and it reads back as a match segment.
impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(&escape(key)),
            Segment::Index(index) => write!(f, "{}", index),
            Segment::Match(constraints) => {
                let json = serde_json::to_string(constraints).map_err(|_| fmt::Error)?;
                write!(f, "~{}", escape(&json))
            }
        }
    }
}

/// A parsed pointer: zero segments select the document root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pointer {
    segments: Vec<Segment>,
}

impl Pointer {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// The empty pointer, selecting the root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses pointer text. See [`Parser`] for the accepted syntax.
    pub fn parse(pointer: &str) -> Result<Self, PointerError> {
        Parser::parse(pointer)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true if any segment can select more than one node.
    pub fn fans_out(&self) -> bool {
        self.segments.iter().any(Segment::is_match)
    }
}

impl FromStr for Pointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pointer::parse(s)
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

/// RFC6901 escaping: `~` becomes `~0`, then `/` becomes `~1`.
pub(crate) fn escape(text: &str) -> String {
    text.replace('~', "~0").replace('/', "~1")
}

/// RFC6901 unescaping: `~1` becomes `/`, then `~0` becomes `~`.
pub(crate) fn unescape(text: &str) -> String {
    text.replace("~1", "/").replace("~0", "~")
}
