//! Position-annotated YAML document trees.
//!
//! This module contains the tree that pointers are resolved against
//! (`node`) and the builder that produces it from YAML text (`parser`).

pub mod node;
pub mod parser;
