//! Error types for brutus operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrutusError {
    #[error("Invalid rules: {0}")]
    InvalidRules(String),
}

pub type Result<T> = std::result::Result<T, BrutusError>;
