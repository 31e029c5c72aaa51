//! # nestmap
//!
//! Utilities for arbitrarily nested, heterogeneous trees.
//!
//! A tree is a [`serde_json::Value`]: objects and arrays are nodes, every
//! other variant is a leaf. Objects keep insertion order (serde_json is built
//! with `preserve_order`), and every operation here respects it.
//!
//! ## Modules
//!
//! - [`walk`]: stack-safe, document-order traversal of every descendant
//! - [`search`]: deep value/key search with short-circuit and optional path
//! - [`merge`]: distinct recursive merge (overlay wins on collisions)
//! - [`codec`]: dot-notation flatten/unflatten and set-by-path
//! - [`map`]: recursive leaf mapping
//! - [`access`]: first/last/middle, pluck/inject, shove
//! - [`key`]: keys, paths and node classification
//! - [`error`]: Error types
//!
//! Trees must not contain cycles; `serde_json::Value` cannot express one
//! without unsafe code, so this holds by construction.

pub mod access;
pub mod codec;
pub mod error;
pub mod key;
pub mod map;
pub mod merge;
pub mod search;
pub mod walk;

pub use access::{first, inject, last, middle, pluck, shove};
pub use codec::{
    flatten, flatten_map, flatten_with, set_path, set_path_in_place, set_path_with, unflatten,
    unflatten_with, CodecOptions, ConflictPolicy, FlatMap, DEFAULT_SEPARATOR,
};
pub use error::NestError;
pub use key::{join_path, Key};
pub use map::map_leaves;
pub use merge::{merge, merge_all};
pub use search::{find_key, find_value, locate_key, locate_value};
pub use walk::{walk, PathVisit, Paths, Visit, Walk};
