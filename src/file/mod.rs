//! File I/O for YAML documents.
//!
//! Reads YAML from disk or stdin (optionally gzip-compressed) and builds
//! position-annotated document trees.

pub mod loader;
