//! # chronomat
//!
//! Deterministic date helpers.
//!
//! Every function takes explicit instants; nothing reads the system clock,
//! so callers pass "now" themselves and results are reproducible.
//!
//! ## Modules
//!
//! - [`calendar`]: parsing, calendar-aware diffs, interval arithmetic
//! - [`relative`]: "3 days ago" / "in 2 hours" phrasing
//! - [`moon`]: moon phase for an instant
//! - [`range`]: half-open date ranges with union, intersection and difference
//! - [`error`]: Error types

pub mod calendar;
pub mod error;
pub mod moon;
pub mod range;
pub mod relative;

pub use calendar::{add, add_in, diff, parse, parse_in, sub, DateDiff, Interval};
pub use error::ChronoError;
pub use moon::{moon_phase, MoonPhase, PhaseName, SYNODIC_MONTH_DAYS};
pub use range::{difference, intersection, normalize, union, DateRange};
pub use relative::relative;
