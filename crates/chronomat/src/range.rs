//! Half-open date ranges and set operations over lists of them.
//!
//! A list of ranges stands for the set of instants covered by any of them.
//! [`union`], [`intersection`] and [`difference`] all return normalized
//! lists: sorted by start, with overlapping and touching ranges merged.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use tracing::trace;

use crate::calendar::parse;
use crate::error::{ChronoError, Result};

/// The instants `start <= t < end`. Never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    /// # Errors
    ///
    /// Returns [`ChronoError::InvalidRange`] unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(ChronoError::InvalidRange(format!(
                "start {} is not before end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    /// Build a range from two strings accepted by [`parse`].
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse(start, None)?, parse(end, None)?)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Whole days covered.
    pub fn days(&self) -> i64 {
        self.duration().num_days()
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Whether the two ranges share at least one instant. Touching ranges do not.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Sort `ranges` and merge any that overlap or touch.
pub fn normalize(ranges: &[DateRange]) -> Vec<DateRange> {
    let mut sorted = ranges.to_vec();
    sorted.sort();

    let mut merged: Vec<DateRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => {
                last.end = last.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }
    trace!(input = ranges.len(), output = merged.len(), "normalized date ranges");
    merged
}

/// Instants covered by `a` or `b`.
pub fn union(a: &[DateRange], b: &[DateRange]) -> Vec<DateRange> {
    let all: Vec<DateRange> = a.iter().chain(b).copied().collect();
    normalize(&all)
}

/// Instants covered by both `a` and `b`.
///
/// # Examples
///
/// ```
/// use chronomat::range::{intersection, DateRange};
///
/// let a = [DateRange::parse("2026-03-01", "2026-03-10").unwrap()];
/// let b = [DateRange::parse("2026-03-05", "2026-03-20").unwrap()];
/// let both = intersection(&a, &b);
/// assert_eq!(both, vec![DateRange::parse("2026-03-05", "2026-03-10").unwrap()]);
/// ```
pub fn intersection(a: &[DateRange], b: &[DateRange]) -> Vec<DateRange> {
    let a = normalize(a);
    let b = normalize(b);
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        let start = a[i].start.max(b[j].start);
        let end = a[i].end.min(b[j].end);
        if start < end {
            out.push(DateRange { start, end });
        }
        if a[i].end < b[j].end {
            i += 1;
        } else {
            j += 1;
        }
    }
    out
}

/// Instants covered by `a` but not by `b`.
pub fn difference(a: &[DateRange], b: &[DateRange]) -> Vec<DateRange> {
    let removed = normalize(b);
    let mut out = Vec::new();

    for range in normalize(a) {
        let mut cursor = range.start;
        for cut in &removed {
            if cut.end <= cursor {
                continue;
            }
            if cut.start >= range.end {
                break;
            }
            if cut.start > cursor {
                out.push(DateRange {
                    start: cursor,
                    end: cut.start,
                });
            }
            cursor = cursor.max(cut.end);
        }
        if cursor < range.end {
            out.push(DateRange {
                start: cursor,
                end: range.end,
            });
        }
    }
    out
}
