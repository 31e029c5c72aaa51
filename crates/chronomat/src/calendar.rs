//! Calendar parsing, diffing and interval arithmetic.
//!
//! Pure functions over explicit inputs: nothing here reads the system
//! clock, so the caller supplies every instant (including "now").
//!
//! # Functions
//!
//! - [`parse`] / [`parse_in`]: Parse a datetime string, optionally with an explicit format
//! - [`diff`]: Calendar-aware difference between two instants
//! - [`add`] / [`sub`] / [`add_in`]: Shift an instant by an [`Interval`]

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone,
    Utc,
};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{ChronoError, Result};

/// Formats tried, in order, for input without an explicit format or offset.
const NAIVE_DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMAT: &str = "%Y-%m-%d";

// ── parse ───────────────────────────────────────────────────────────────────

/// Result of parsing before a timezone is applied.
enum Parsed {
    /// The input carried its own offset.
    Absolute(DateTime<Utc>),
    /// Wall-clock time with no offset.
    Local(NaiveDateTime),
}

/// Parse a datetime string into a UTC instant.
///
/// Without `format`, accepts RFC 3339 (`2026-03-15T14:00:00Z`),
/// `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM` and
/// `YYYY-MM-DD`. Inputs without an offset are read as UTC; a bare date means
/// midnight.
///
/// With `format`, the input must match that strftime pattern exactly. The
/// pattern may describe a full datetime (with or without offset) or a date.
///
/// # Errors
///
/// Returns [`ChronoError::InvalidDatetime`] if nothing matches.
///
/// # Examples
///
/// ```
/// use chronomat::calendar::parse;
///
/// let dt = parse("15/03/2026 09:30", Some("%d/%m/%Y %H:%M")).unwrap();
/// assert_eq!(dt.to_rfc3339(), "2026-03-15T09:30:00+00:00");
/// ```
pub fn parse(input: &str, format: Option<&str>) -> Result<DateTime<Utc>> {
    match parse_any(input, format)? {
        Parsed::Absolute(dt) => Ok(dt),
        Parsed::Local(naive) => Ok(naive.and_utc()),
    }
}

/// Like [`parse`], but inputs without an offset are wall-clock time in `timezone`.
///
/// # Errors
///
/// Returns [`ChronoError::InvalidTimezone`] for an unknown IANA name, and
/// [`ChronoError::InvalidDatetime`] if the input cannot be parsed or names a
/// local time that is skipped or repeated by a DST transition.
pub fn parse_in(input: &str, format: Option<&str>, timezone: &str) -> Result<DateTime<Utc>> {
    let tz = parse_timezone(timezone)?;
    match parse_any(input, format)? {
        Parsed::Absolute(dt) => Ok(dt),
        Parsed::Local(naive) => tz
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| {
                ChronoError::InvalidDatetime(format!(
                    "'{input}' is ambiguous or nonexistent in {timezone}"
                ))
            }),
    }
}

fn parse_any(input: &str, format: Option<&str>) -> Result<Parsed> {
    let s = input.trim();

    if let Some(fmt) = format {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(Parsed::Absolute(dt.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Parsed::Local(naive));
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(Parsed::Local(date.and_time(NaiveTime::MIN)));
        }
        return Err(ChronoError::InvalidDatetime(format!(
            "'{s}' does not match format '{fmt}'"
        )));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(Parsed::Absolute(dt.with_timezone(&Utc)));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Parsed::Local(naive));
        }
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map(|date| Parsed::Local(date.and_time(NaiveTime::MIN)))
        .map_err(|e| ChronoError::InvalidDatetime(format!("'{s}': {e}")))
}

/// Parse an IANA timezone string into `Tz`.
pub(crate) fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| ChronoError::InvalidTimezone(format!("'{s}'")))
}

// ── diff ────────────────────────────────────────────────────────────────────

/// Calendar-aware difference between two instants.
///
/// The components are always non-negative; `invert` tells the direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateDiff {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    /// Hours component (0-23).
    pub hours: i64,
    /// Minutes component (0-59).
    pub minutes: i64,
    /// Seconds component (0-59).
    pub seconds: i64,
    /// Whole days between the two instants, ignoring the month breakdown.
    pub total_days: i64,
    /// `true` when the second instant is earlier than the first.
    pub invert: bool,
}

impl DateDiff {
    /// Human-readable form, e.g. "1 year, 2 months, 3 hours".
    pub fn human_readable(&self) -> String {
        let units = [
            (self.years, "year"),
            (self.months, "month"),
            (self.days, "day"),
            (self.hours, "hour"),
            (self.minutes, "minute"),
            (self.seconds, "second"),
        ];
        let parts: Vec<String> = units
            .iter()
            .filter(|(n, _)| *n > 0)
            .map(|(n, unit)| plural(*n, unit))
            .collect();
        if parts.is_empty() {
            return plural(0, "second");
        }
        parts.join(", ")
    }
}

pub(crate) fn plural(n: i64, unit: &str) -> String {
    format!("{} {}{}", n, unit, if n == 1 { "" } else { "s" })
}

/// Difference from `a` to `b`, broken down into calendar units.
///
/// Whole months are counted first (clamping to month ends, so Jan 31 plus
/// one month is the last day of February), then the remainder is split into
/// days, hours, minutes and seconds. Sub-second precision is dropped.
///
/// # Examples
///
/// ```
/// use chronomat::calendar::{diff, parse};
///
/// let a = parse("2024-01-15T10:00:00Z", None).unwrap();
/// let b = parse("2025-03-20T12:30:45Z", None).unwrap();
/// let d = diff(a, b);
/// assert_eq!((d.years, d.months, d.days), (1, 2, 5));
/// assert!(!d.invert);
/// ```
pub fn diff(a: DateTime<Utc>, b: DateTime<Utc>) -> DateDiff {
    let invert = b < a;
    let (start, end) = if invert { (b, a) } else { (a, b) };

    let mut months = i64::from(end.year() - start.year()) * 12 + i64::from(end.month())
        - i64::from(start.month());
    let anchor = loop {
        match shift_months(start, months) {
            Some(candidate) if candidate <= end => break candidate,
            _ if months > 0 => months -= 1,
            _ => break start,
        }
    };

    let remainder = (end - anchor).num_seconds();
    DateDiff {
        years: months / 12,
        months: months % 12,
        days: remainder / 86_400,
        hours: remainder % 86_400 / 3_600,
        minutes: remainder % 3_600 / 60,
        seconds: remainder % 60,
        total_days: (end - start).num_days(),
        invert,
    }
}

fn shift_months<T: TimeZone>(dt: DateTime<T>, months: i64) -> Option<DateTime<T>> {
    let n = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        dt.checked_add_months(n)
    } else {
        dt.checked_sub_months(n)
    }
}

// ── Interval ────────────────────────────────────────────────────────────────

/// A signed calendar interval such as `+1y2mo`, `-3d12h` or `90m`.
///
/// Units: `y` years, `mo` months, `w` weeks, `d` days, `h` hours, `m`
/// minutes, `s` seconds. Components may repeat (`1d1d` is two days). A
/// missing sign means `+`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interval {
    /// +1 or -1.
    pub sign: i64,
    pub years: i64,
    pub months: i64,
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Default for Interval {
    /// The zero interval, `+0s`.
    fn default() -> Self {
        Self {
            sign: 1,
            years: 0,
            months: 0,
            weeks: 0,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }
}

impl FromStr for Interval {
    type Err = ChronoError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ChronoError::InvalidInterval("empty interval".to_string()));
        }

        let (sign, rest) = match s.as_bytes().first() {
            Some(b'+') => (1i64, &s[1..]),
            Some(b'-') => (-1i64, &s[1..]),
            _ => (1i64, s),
        };
        if rest.is_empty() {
            return Err(ChronoError::InvalidInterval(format!(
                "interval has no components: '{s}'"
            )));
        }

        let mut parsed = Interval {
            sign,
            ..Default::default()
        };
        let mut num_buf = String::new();
        let mut chars = rest.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch.is_ascii_digit() {
                num_buf.push(ch);
                continue;
            }
            if num_buf.is_empty() {
                return Err(ChronoError::InvalidInterval(format!(
                    "expected number before '{ch}' in '{s}'"
                )));
            }
            let n: i64 = num_buf
                .parse()
                .map_err(|_| ChronoError::InvalidInterval(format!("invalid number in '{s}'")))?;
            num_buf.clear();

            let field = match ch.to_ascii_lowercase() {
                'y' => &mut parsed.years,
                'm' if chars.peek().is_some_and(|c| c.eq_ignore_ascii_case(&'o')) => {
                    chars.next();
                    &mut parsed.months
                }
                'm' => &mut parsed.minutes,
                'w' => &mut parsed.weeks,
                'd' => &mut parsed.days,
                'h' => &mut parsed.hours,
                's' => &mut parsed.seconds,
                _ => {
                    return Err(ChronoError::InvalidInterval(format!(
                        "unknown unit '{ch}' in '{s}'"
                    )));
                }
            };
            *field = field
                .checked_add(n)
                .ok_or_else(|| ChronoError::InvalidInterval(format!("'{s}' is out of range")))?;
        }

        if !num_buf.is_empty() {
            return Err(ChronoError::InvalidInterval(format!(
                "number without unit at end of '{s}'"
            )));
        }

        Ok(parsed)
    }
}

impl fmt::Display for Interval {
    /// Normalized form, e.g. `+1y2mo3d`. A zero interval prints as `+0s`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.sign >= 0 { "+" } else { "-" })?;
        let units = [
            (self.years, "y"),
            (self.months, "mo"),
            (self.weeks, "w"),
            (self.days, "d"),
            (self.hours, "h"),
            (self.minutes, "m"),
            (self.seconds, "s"),
        ];
        let mut wrote = false;
        for (n, unit) in units.iter().filter(|(n, _)| *n != 0) {
            write!(f, "{n}{unit}")?;
            wrote = true;
        }
        if !wrote {
            f.write_str("0s")?;
        }
        Ok(())
    }
}

impl Interval {
    /// Shift `dt` by this interval, or against it when `direction` is -1.
    ///
    /// Years, months, weeks and days move the wall-clock date in `dt`'s own
    /// timezone; hours, minutes and seconds are absolute time.
    fn apply<T: TimeZone>(&self, dt: DateTime<T>, direction: i64) -> Result<DateTime<T>> {
        let out_of_range = || ChronoError::InvalidInterval(format!("'{self}' is out of range"));
        let sign = self.sign * direction;

        let months = self
            .years
            .checked_mul(12)
            .and_then(|m| m.checked_add(self.months))
            .and_then(|m| m.checked_mul(sign))
            .ok_or_else(out_of_range)?;
        let days = self
            .weeks
            .checked_mul(7)
            .and_then(|d| d.checked_add(self.days))
            .and_then(|d| d.checked_mul(sign))
            .ok_or_else(out_of_range)?;
        let seconds = self
            .hours
            .checked_mul(3_600)
            .and_then(|s| s.checked_add(self.minutes.checked_mul(60)?))
            .and_then(|s| s.checked_add(self.seconds))
            .and_then(|s| s.checked_mul(sign))
            .ok_or_else(out_of_range)?;

        let nonexistent = || {
            ChronoError::InvalidDatetime(format!(
                "shifting by '{self}' lands outside the supported range or on a skipped local time"
            ))
        };

        let shifted = shift_months(dt, months).ok_or_else(nonexistent)?;
        let shifted = if days >= 0 {
            shifted.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            shifted.checked_sub_days(Days::new(days.unsigned_abs()))
        }
        .ok_or_else(nonexistent)?;
        let delta = TimeDelta::try_seconds(seconds).ok_or_else(out_of_range)?;
        shifted.checked_add_signed(delta).ok_or_else(nonexistent)
    }
}

/// Add an interval to a UTC instant.
///
/// # Errors
///
/// Returns [`ChronoError::InvalidInterval`] if `interval` cannot be parsed,
/// or [`ChronoError::InvalidDatetime`] if the result is out of range.
///
/// # Examples
///
/// ```
/// use chronomat::calendar::{add, parse};
///
/// let start = parse("2026-01-31", None).unwrap();
/// // Month arithmetic clamps to the end of February
/// assert_eq!(add(start, "+1mo").unwrap().to_rfc3339(), "2026-02-28T00:00:00+00:00");
/// ```
pub fn add(instant: DateTime<Utc>, interval: &str) -> Result<DateTime<Utc>> {
    interval.parse::<Interval>()?.apply(instant, 1)
}

/// Subtract an interval from a UTC instant. `sub(t, "1d")` equals `add(t, "-1d")`.
pub fn sub(instant: DateTime<Utc>, interval: &str) -> Result<DateTime<Utc>> {
    interval.parse::<Interval>()?.apply(instant, -1)
}

/// Add an interval with calendar units applied in `timezone`'s wall clock.
///
/// `+1d` across a DST change keeps the local time of day instead of adding
/// 24 hours.
pub fn add_in(instant: DateTime<Utc>, interval: &str, timezone: &str) -> Result<DateTime<Utc>> {
    let tz = parse_timezone(timezone)?;
    let parsed = interval.parse::<Interval>()?;
    parsed
        .apply(instant.with_timezone(&tz), 1)
        .map(|dt| dt.with_timezone(&Utc))
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        parse(s, None).unwrap()
    }

    // ── parse tests ─────────────────────────────────────────────────────

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = utc("2026-03-15T10:00:00-04:00");
        assert_eq!(dt.to_rfc3339(), "2026-03-15T14:00:00+00:00");
    }

    #[test]
    fn test_parse_naive_forms_default_to_utc() {
        assert_eq!(utc("2026-03-15 14:00:00"), utc("2026-03-15T14:00:00Z"));
        assert_eq!(utc("2026-03-15T14:00:00"), utc("2026-03-15T14:00:00Z"));
        assert_eq!(utc("2026-03-15 14:00"), utc("2026-03-15T14:00:00Z"));
        assert_eq!(utc("2026-03-15"), utc("2026-03-15T00:00:00Z"));
    }

    #[test]
    fn test_parse_explicit_formats() {
        let dt = parse("03/15/2026", Some("%m/%d/%Y")).unwrap();
        assert_eq!(dt, utc("2026-03-15"));
        let dt = parse("2026-03-15 09:00 +0200", Some("%Y-%m-%d %H:%M %z")).unwrap();
        assert_eq!(dt, utc("2026-03-15T07:00:00Z"));
    }

    #[test]
    fn test_parse_format_mismatch() {
        let err = parse("2026-03-15", Some("%d/%m/%Y")).unwrap_err();
        assert!(err.to_string().contains("does not match format"), "got: {err}");
    }

    #[test]
    fn test_parse_garbage() {
        let err = parse("not-a-date", None).unwrap_err().to_string();
        assert!(err.contains("Invalid datetime"), "got: {err}");
    }

    #[test]
    fn test_parse_in_timezone() {
        // March 15 2026 is EDT (UTC-4)
        let dt = parse_in("2026-03-15 10:00:00", None, "America/New_York").unwrap();
        assert_eq!(dt, utc("2026-03-15T14:00:00Z"));
        // An explicit offset wins over the timezone
        let dt = parse_in("2026-03-15T10:00:00Z", None, "America/New_York").unwrap();
        assert_eq!(dt, utc("2026-03-15T10:00:00Z"));
    }

    #[test]
    fn test_parse_in_invalid_timezone() {
        let err = parse_in("2026-03-15", None, "Invalid/Zone").unwrap_err();
        assert!(err.to_string().contains("Invalid timezone"), "got: {err}");
    }

    #[test]
    fn test_parse_in_skipped_local_time() {
        // March 8 2026: US spring forward skips 02:30
        let result = parse_in("2026-03-08 02:30:00", None, "America/New_York");
        assert!(result.is_err());
    }

    // ── diff tests ──────────────────────────────────────────────────────

    #[test]
    fn test_diff_calendar_breakdown() {
        let d = diff(utc("2024-01-15T10:00:00Z"), utc("2025-03-20T12:30:45Z"));
        assert_eq!(d.years, 1);
        assert_eq!(d.months, 2);
        assert_eq!(d.days, 5);
        assert_eq!(d.hours, 2);
        assert_eq!(d.minutes, 30);
        assert_eq!(d.seconds, 45);
        assert_eq!(d.total_days, 430);
        assert!(!d.invert);
    }

    #[test]
    fn test_diff_inverted() {
        let d = diff(utc("2026-03-16T17:00:00Z"), utc("2026-03-16T09:00:00Z"));
        assert!(d.invert);
        assert_eq!(d.hours, 8);
        assert_eq!(d.total_days, 0);
    }

    #[test]
    fn test_diff_month_end_clamping() {
        // Jan 31 + 1 month clamps to Feb 29 (2024 is a leap year)
        let d = diff(utc("2024-01-31"), utc("2024-03-01"));
        assert_eq!((d.months, d.days), (1, 1));
    }

    #[test]
    fn test_diff_partial_month_is_days() {
        let d = diff(utc("2026-01-20"), utc("2026-02-10"));
        assert_eq!((d.months, d.days), (0, 21));
    }

    #[test]
    fn test_diff_same_instant() {
        let d = diff(utc("2026-01-01"), utc("2026-01-01"));
        assert_eq!(d.human_readable(), "0 seconds");
        assert!(!d.invert);
    }

    #[test]
    fn test_diff_human_readable() {
        let d = diff(utc("2026-03-16T00:00:00Z"), utc("2027-04-16T03:15:00Z"));
        assert_eq!(d.human_readable(), "1 year, 1 month, 3 hours, 15 minutes");
    }

    // ── Interval tests ──────────────────────────────────────────────────

    #[test]
    fn test_interval_parse_and_display() {
        let iv: Interval = "+1y2mo3w4d5h6m7s".parse().unwrap();
        assert_eq!(
            (iv.years, iv.months, iv.weeks, iv.days, iv.hours, iv.minutes, iv.seconds),
            (1, 2, 3, 4, 5, 6, 7)
        );
        assert_eq!(iv.to_string(), "+1y2mo3w4d5h6m7s");

        let iv: Interval = "90m".parse().unwrap();
        assert_eq!(iv.sign, 1);
        assert_eq!(iv.minutes, 90);

        let iv: Interval = "-2d2d".parse().unwrap();
        assert_eq!(iv.to_string(), "-4d");
    }

    #[test]
    fn test_interval_parse_errors() {
        assert!("".parse::<Interval>().is_err());
        assert!("+".parse::<Interval>().is_err());
        assert!("+5".parse::<Interval>().is_err());
        assert!("+d".parse::<Interval>().is_err());
        let err = "+3q".parse::<Interval>().unwrap_err().to_string();
        assert!(err.contains("unknown unit"), "got: {err}");
    }

    // ── add / sub tests ─────────────────────────────────────────────────

    #[test]
    fn test_add_sub_basic() {
        let t = utc("2026-03-16T10:00:00Z");
        assert_eq!(add(t, "+2h").unwrap(), utc("2026-03-16T12:00:00Z"));
        assert_eq!(add(t, "1d2h30m").unwrap(), utc("2026-03-17T12:30:00Z"));
        assert_eq!(sub(t, "3d").unwrap(), utc("2026-03-13T10:00:00Z"));
        assert_eq!(sub(t, "-3d").unwrap(), add(t, "3d").unwrap());
        assert_eq!(add(t, "+2w").unwrap(), utc("2026-03-30T10:00:00Z"));
    }

    #[test]
    fn test_add_years_from_leap_day() {
        let t = utc("2024-02-29");
        assert_eq!(add(t, "1y").unwrap(), utc("2025-02-28"));
        assert_eq!(sub(t, "1mo").unwrap(), utc("2024-01-29"));
    }

    #[test]
    fn test_add_in_preserves_wall_clock_across_dst() {
        // March 8 2026: US spring forward. 10:00 EST the day before = 15:00 UTC.
        let t = utc("2026-03-07T15:00:00Z");
        let shifted = add_in(t, "+1d", "America/New_York").unwrap();
        // 10:00 EDT = 14:00 UTC
        assert_eq!(shifted, utc("2026-03-08T14:00:00Z"));
        // In UTC it is a plain 24 hours
        assert_eq!(add(t, "+1d").unwrap(), utc("2026-03-08T15:00:00Z"));
    }

    #[test]
    fn test_add_invalid_interval() {
        let err = add(utc("2026-01-01"), "soon").unwrap_err();
        assert!(matches!(err, ChronoError::InvalidInterval(_)));
    }

    #[test]
    fn test_add_out_of_range() {
        assert!(add(utc("2026-01-01"), "+9999999999y").is_err());
    }
}
