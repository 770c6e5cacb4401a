//! yamlptr - locate values in YAML documents with extended JSON pointers.
//!
//! Pointers follow RFC6901 (`/spec/replicas`, `/items/0`, `~0` and `~1` escapes)
//! plus an extension segment `~{...}` that selects sequence elements whose fields
//! equal the given values. Every match carries the line and column of its scalar
//! in the original source.
//!
//! ```
//! use yamlptr::document::parser::parse_yaml;
//! use yamlptr::pointer;
//!
//! let doc = parse_yaml("containers:\n- name: app\n  image: nginx\n").unwrap();
//! let found = pointer::find(&doc, r#"/containers/~{"name":"app"}/image"#).unwrap();
//! assert_eq!(found.value, "nginx");
//! assert_eq!((found.line, found.column), (3, 10));
//! ```

pub mod config;
pub mod document;
pub mod file;
pub mod output;
pub mod pointer;
