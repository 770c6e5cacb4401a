//! Pointer string parser.
//!
//! Accepts RFC6901 JSON Pointers plus the `~{...}` extension segment:
//!
//! - `""` selects the root
//! - `/key` selects a mapping entry; `~1` and `~0` unescape to `/` and `~`
//! - `/0`, `/12` select a sequence element (or the key `"0"`, `"12"` in a mapping)
//! - `/~{"name":"app"}` selects sequence elements whose `name` field is `app`
//! - `/~{}` selects every sequence element

use indexmap::IndexMap;

use super::ast::{unescape, Constraints, Literal, Pointer, Segment};
use super::error::PointerError;

/// Marker that opens an extension match segment.
const MATCH_MARKER: &str = "~{";

/// Parser for pointer strings.
pub struct Parser<'a> {
    input: &'a str,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given pointer string.
    pub fn new(pointer: &'a str) -> Self {
        Self { input: pointer }
    }

    /// Parses the pointer string into a [`Pointer`].
    pub fn parse(pointer: &str) -> Result<Pointer, PointerError> {
        Parser::new(pointer).parse_pointer()
    }

    fn parse_pointer(&self) -> Result<Pointer, PointerError> {
        if self.input.is_empty() {
            return Ok(Pointer::root());
        }

        let rest = self
            .input
            .strip_prefix('/')
            .ok_or_else(|| PointerError::MalformedPointer {
                pointer: self.input.to_string(),
            })?;

        // Split on raw text so an unescaped "~1" never becomes a delimiter.
        let segments = rest
            .split('/')
            .map(|raw| self.parse_segment(raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Pointer::new(segments))
    }

    /// Unescapes one raw segment and classifies the result.
    ///
    /// Classification happens on the unescaped text, so `~0{...}` is a
    /// match segment too.
    fn parse_segment(&self, raw: &str) -> Result<Segment, PointerError> {
        let text = unescape(raw);
        if text.starts_with(MATCH_MARKER) && text.ends_with('}') {
            return self.parse_match(raw, &text).map(Segment::Match);
        }

        match parse_index(&text) {
            Some(index) => Ok(Segment::Index(index)),
            None => Ok(Segment::Key(text)),
        }
    }

    /// Parses the flat JSON object following the `~` of a match segment.
    ///
    /// `raw` is the segment as written, used for error context.
    fn parse_match(&self, raw: &str, text: &str) -> Result<Constraints, PointerError> {
        let fields: IndexMap<String, serde_json::Value> =
            serde_json::from_str(&text[1..]).map_err(|err| self.malformed(raw, err.to_string()))?;

        fields
            .into_iter()
            .map(|(field, value)| {
                let literal = match value {
                    serde_json::Value::String(s) => Literal::String(s),
                    serde_json::Value::Number(n) => Literal::Number(n),
                    serde_json::Value::Bool(b) => Literal::Bool(b),
                    other => {
                        return Err(self.malformed(
                            raw,
                            format!(
                                "field {:?} must be a string, number or boolean, found {}",
                                field,
                                json_type_name(&other)
                            ),
                        ))
                    }
                };
                Ok((field, literal))
            })
            .collect()
    }

    fn malformed(&self, segment: &str, reason: String) -> PointerError {
        PointerError::MalformedMatchExpression {
            pointer: self.input.to_string(),
            segment: segment.to_string(),
            reason,
        }
    }
}

/// Decimal digits without a leading zero (or exactly "0") that fit a usize.
fn parse_index(text: &str) -> Option<usize> {
    let digits = !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit());
    if !digits || (text.len() > 1 && text.starts_with('0')) {
        return None;
    }
    text.parse().ok()
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
