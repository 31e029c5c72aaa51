//! Relative-time phrasing ("3 days ago", "in 2 hours").

use chrono::{DateTime, Utc};

use crate::calendar::{diff, plural};

/// Differences below this many seconds read as "just now".
pub const JUST_NOW_SECONDS: i64 = 10;

/// Describe `then` relative to `now` using its largest non-zero unit.
///
/// Units are years, months, weeks, days, hours, minutes and seconds. The
/// count is truncated, so 1 day 23 hours reads as "1 day ago".
///
/// # Examples
///
/// ```
/// use chronomat::calendar::parse;
/// use chronomat::relative::relative;
///
/// let now = parse("2026-02-18T14:30:00Z", None).unwrap();
/// assert_eq!(relative(parse("2026-02-15T09:00:00Z", None).unwrap(), now), "3 days ago");
/// assert_eq!(relative(parse("2026-02-18T16:45:00Z", None).unwrap(), now), "in 2 hours");
/// ```
pub fn relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let d = diff(then, now);
    let future = d.invert;

    let (n, unit) = if d.years > 0 {
        (d.years, "year")
    } else if d.months > 0 {
        (d.months, "month")
    } else if d.days >= 7 {
        (d.days / 7, "week")
    } else if d.days > 0 {
        (d.days, "day")
    } else if d.hours > 0 {
        (d.hours, "hour")
    } else if d.minutes > 0 {
        (d.minutes, "minute")
    } else if d.seconds >= JUST_NOW_SECONDS {
        (d.seconds, "second")
    } else {
        return "just now".to_string();
    };

    let amount = plural(n, unit);
    if future {
        format!("in {amount}")
    } else {
        format!("{amount} ago")
    }
}
