//! Extended JSON Pointer resolution over position-annotated YAML trees.
//!
//! # Supported Syntax
//!
//! - `""` - the document root
//! - `/key` - mapping entry (`~1` is `/`, `~0` is `~`, as in RFC6901)
//! - `/0` - sequence element by position, or the key `"0"` in a mapping
//! - `/~{"field":"value"}` - every sequence element whose `field` equals `value`
//! - `/~{}` - every sequence element
//!
//! # Lookup policies
//!
//! - [`find`] returns the first scalar reached and fails with
//!   [`PointerError::NotFound`] when there is none.
//! - [`find_all`] returns every scalar reached; a path that does not exist
//!   yields an empty list, never an error.
//! - [`find_all_strict`] returns every scalar reached, or `NotFound`.
//!
//! Parse errors are reported by all three.
//!
//! # Examples
//!
//! ```
//! use yamlptr::document::parser::parse_yaml;
//! use yamlptr::pointer::{find, find_all};
//!
//! let doc = parse_yaml("d:\n- e\n- f\n").unwrap();
//! let e = find(&doc, "/d/0").unwrap();
//! assert_eq!((e.value.as_str(), e.line, e.column), ("e", 2, 3));
//!
//! assert!(find(&doc, "/bad/path").unwrap_err().is_not_found());
//! assert!(find_all(&doc, "/bad/path").unwrap().is_empty());
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use ast::{Constraints, Literal, Pointer, Segment};
pub use error::{ErrorKind, PointerError};
pub use evaluator::{Evaluator, Resolved, Walk};
pub use parser::Parser;

use crate::document::node::Node;

pub type Result<T> = std::result::Result<T, PointerError>;

/// Resolves `pointer` to a single scalar.
///
/// When a match segment selects several elements, the first result in
/// document order is returned.
pub fn find(root: &Node, pointer: &str) -> Result<Resolved> {
    find_all_strict(root, pointer)?
        .into_iter()
        .next()
        .ok_or_else(|| not_found(pointer))
}

/// Resolves `pointer` to every scalar it reaches. Absence is not an error.
pub fn find_all(root: &Node, pointer: &str) -> Result<Vec<Resolved>> {
    let parsed = Pointer::parse(pointer)?;
    Ok(parsed.resolve(root).scalars())
}

/// Resolves `pointer` to every scalar it reaches, failing with
/// [`PointerError::NotFound`] if there are none.
pub fn find_all_strict(root: &Node, pointer: &str) -> Result<Vec<Resolved>> {
    let results: Vec<Resolved> = find_all_nodes(root, pointer)?
        .into_iter()
        .filter_map(Resolved::from_node)
        .collect();
    if results.is_empty() {
        return Err(not_found(pointer));
    }
    Ok(results)
}

/// Resolves `pointer` to a single node of any kind.
///
/// Unlike [`find`], a pointer that lands on a mapping or sequence succeeds,
/// which lets callers report the location of a whole subtree.
pub fn find_node<'a>(root: &'a Node, pointer: &str) -> Result<&'a Node> {
    find_all_nodes(root, pointer)?
        .into_iter()
        .next()
        .ok_or_else(|| not_found(pointer))
}

/// Resolves `pointer` to every node it reaches, of any kind, failing with
/// [`PointerError::NotFound`] if the walk stalls.
pub fn find_all_nodes<'a>(root: &'a Node, pointer: &str) -> Result<Vec<&'a Node>> {
    let parsed = Pointer::parse(pointer)?;
    match parsed.resolve(root) {
        Walk::Reached(nodes) => Ok(nodes),
        Walk::Stalled { segment } => Err(PointerError::NotFound {
            pointer: pointer.to_string(),
            segment: parsed.segments().get(segment).map(ToString::to_string),
        }),
    }
}

fn not_found(pointer: &str) -> PointerError {
    PointerError::NotFound {
        pointer: pointer.to_string(),
        segment: None,
    }
}
