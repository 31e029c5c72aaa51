//! # brutus
//!
//! Password strength evaluation.
//!
//! Configure a [`PasswordRules`] set with chained setters, then
//! [`evaluate`] a password against it to get a pass/fail per rule and an
//! overall verdict. The password itself is never logged.
//!
//! ## Modules
//!
//! - [`rules`]: fluent rule configuration and validation
//! - [`evaluate`](mod@evaluate): per-rule checks and entropy estimate
//! - [`error`]: Error types

pub mod error;
pub mod evaluate;
pub mod rules;

pub use error::BrutusError;
pub use evaluate::{entropy_bits, evaluate, Evaluation, Rule, RuleCheck};
pub use rules::PasswordRules;
