//! Error types for nestmap operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NestError {
    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Capacity exceeded: cannot shove {requested} values into a sequence of {available}")]
    CapacityExceeded { requested: usize, available: usize },

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Path conflict at '{path}': found {found} where a container is required")]
    PathConflict { path: String, found: &'static str },
}

pub type Result<T> = std::result::Result<T, NestError>;
