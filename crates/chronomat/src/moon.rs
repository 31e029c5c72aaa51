//! Moon phase for an instant.
//!
//! Uses the mean synodic month counted from a known new moon. Good to within
//! about a day, which is enough to name the phase.

use std::f64::consts::TAU;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Mean length of a lunation in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530588853;

/// 2000-01-06T18:14:00Z, a new moon, as Unix milliseconds.
const REFERENCE_NEW_MOON_MS: i64 = 947_182_440_000;

const MS_PER_DAY: f64 = 86_400_000.0;

/// The eight conventional phase names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseName {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

const PHASES: [PhaseName; 8] = [
    PhaseName::NewMoon,
    PhaseName::WaxingCrescent,
    PhaseName::FirstQuarter,
    PhaseName::WaxingGibbous,
    PhaseName::FullMoon,
    PhaseName::WaningGibbous,
    PhaseName::LastQuarter,
    PhaseName::WaningCrescent,
];

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PhaseName::NewMoon => "New Moon",
            PhaseName::WaxingCrescent => "Waxing Crescent",
            PhaseName::FirstQuarter => "First Quarter",
            PhaseName::WaxingGibbous => "Waxing Gibbous",
            PhaseName::FullMoon => "Full Moon",
            PhaseName::WaningGibbous => "Waning Gibbous",
            PhaseName::LastQuarter => "Last Quarter",
            PhaseName::WaningCrescent => "Waning Crescent",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoonPhase {
    /// Days since the last new moon, in `[0, SYNODIC_MONTH_DAYS)`.
    pub age_days: f64,
    /// Illuminated fraction of the disc, 0.0 (new) to 1.0 (full).
    pub illumination: f64,
    pub phase: PhaseName,
}

/// Compute the moon phase at `instant`.
///
/// # Examples
///
/// ```
/// use chronomat::calendar::parse;
/// use chronomat::moon::{moon_phase, PhaseName};
///
/// let full = moon_phase(parse("2024-01-25T17:54:00Z", None).unwrap());
/// assert_eq!(full.phase, PhaseName::FullMoon);
/// ```
pub fn moon_phase(instant: DateTime<Utc>) -> MoonPhase {
    let elapsed_days = (instant.timestamp_millis() - REFERENCE_NEW_MOON_MS) as f64 / MS_PER_DAY;
    let age_days = elapsed_days.rem_euclid(SYNODIC_MONTH_DAYS);
    let fraction = age_days / SYNODIC_MONTH_DAYS;
    let illumination = (1.0 - (TAU * fraction).cos()) / 2.0;
    let index = (fraction * 8.0).round() as usize % PHASES.len();

    MoonPhase {
        age_days,
        illumination,
        phase: PHASES[index],
    }
}
