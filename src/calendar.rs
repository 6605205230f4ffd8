use std::fmt;

use serde::{Deserialize, Serialize};

// Calendar constants. An hour is the matcher's cadence unit; four quadrums
// of fifteen days make a year.
pub const TICKS_PER_HOUR: i64 = 2_500;
pub const HOURS_PER_DAY: i64 = 24;
pub const DAYS_PER_QUADRUM: i64 = 15;
pub const QUADRUMS_PER_YEAR: i64 = 4;

pub const TICKS_PER_DAY: i64 = TICKS_PER_HOUR * HOURS_PER_DAY; // 60,000
pub const TICKS_PER_QUADRUM: i64 = TICKS_PER_DAY * DAYS_PER_QUADRUM; // 900,000
pub const TICKS_PER_YEAR: i64 = TICKS_PER_QUADRUM * QUADRUMS_PER_YEAR; // 3,600,000
pub const DAYS_PER_YEAR: i64 = DAYS_PER_QUADRUM * QUADRUMS_PER_YEAR; // 60

/// Degrees of longitude per whole hour of local time offset.
const DEGREES_PER_TIME_ZONE: f32 = 15.0;

/// One of the four quarters of the year.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quadrum {
    Thaw,
    Zenith,
    Fade,
    Frost,
}

impl Quadrum {
    pub const ALL: [Quadrum; 4] = [Quadrum::Thaw, Quadrum::Zenith, Quadrum::Fade, Quadrum::Frost];

    /// Quadrum for a position in the yearly cycle (0–3).
    pub fn from_index(index: i64) -> Self {
        match index.rem_euclid(QUADRUMS_PER_YEAR) {
            0 => Quadrum::Thaw,
            1 => Quadrum::Zenith,
            2 => Quadrum::Fade,
            _ => Quadrum::Frost,
        }
    }

    /// Position in the yearly cycle (0–3).
    pub fn index(self) -> i64 {
        match self {
            Quadrum::Thaw => 0,
            Quadrum::Zenith => 1,
            Quadrum::Fade => 2,
            Quadrum::Frost => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Quadrum::Thaw => "Thaw",
            Quadrum::Zenith => "Zenith",
            Quadrum::Fade => "Fade",
            Quadrum::Frost => "Frost",
        }
    }
}

impl fmt::Display for Quadrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quadrum at an absolute tick.
///
/// The quadrum/day cycle is anchored at absolute tick zero for every map, so
/// every map agrees on which day it is regardless of longitude. Negative
/// ticks are valid and wrap backwards (floor semantics, never truncation).
pub fn quadrum(abs_tick: i64) -> Quadrum {
    Quadrum::from_index(abs_tick.div_euclid(TICKS_PER_QUADRUM))
}

/// Day within the quadrum at an absolute tick (0–14).
pub fn day_of_quadrum(abs_tick: i64) -> u32 {
    abs_tick.div_euclid(TICKS_PER_DAY).rem_euclid(DAYS_PER_QUADRUM) as u32
}

/// Local hour of day at an absolute tick (0–23).
///
/// Longitude shifts the hour by whole time zones (one per 15 degrees);
/// it never shifts the day or quadrum.
pub fn hour_of_day(abs_tick: i64, longitude: f32) -> u32 {
    let local = abs_tick + time_zone_offset(longitude) * TICKS_PER_HOUR;
    local.div_euclid(TICKS_PER_HOUR).rem_euclid(HOURS_PER_DAY) as u32
}

/// Elapsed years since absolute tick zero, as the fractional counter the
/// settlement anniversary text rounds from.
pub fn years_passed_float(abs_tick: i64) -> f32 {
    abs_tick as f32 / TICKS_PER_YEAR as f32
}

fn time_zone_offset(longitude: f32) -> i64 {
    (longitude / DEGREES_PER_TIME_ZONE).round() as i64
}

/// Full calendar coordinate of one absolute tick at one longitude.
///
/// Always computed fresh from the tick; nothing here is cached or stepped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    pub quadrum: Quadrum,
    /// Day within the quadrum (0–14).
    pub day_of_quadrum: u32,
    /// Local hour of day (0–23).
    pub hour: u32,
    /// Whole years elapsed since absolute tick zero (floor; negative before it).
    pub years_elapsed: i64,
}

impl CalendarDate {
    pub fn at(abs_tick: i64, longitude: f32) -> Self {
        Self {
            quadrum: quadrum(abs_tick),
            day_of_quadrum: day_of_quadrum(abs_tick),
            hour: hour_of_day(abs_tick, longitude),
            years_elapsed: abs_tick.div_euclid(TICKS_PER_YEAR),
        }
    }

    /// Same calendar day: quadrum and day-of-quadrum both equal.
    pub fn same_day_as(&self, other: &CalendarDate) -> bool {
        self.quadrum == other.quadrum && self.day_of_quadrum == other.day_of_quadrum
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, year {}, {:02}h",
            self.quadrum,
            self.day_of_quadrum + 1,
            self.years_elapsed,
            self.hour
        )
    }
}
