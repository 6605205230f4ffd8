//! Plain data vocabulary shared by the store, the matcher and the
//! celebration systems. Everything here is serde round-trippable; none of it
//! touches the ECS.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::calendar::Quadrum;

// Celebration timeout bounds, in ticks. Fixed-window celebrations are short
// evening affairs; all-day ones run for most of a day.
pub const FIXED_WINDOW_TIMEOUT_MIN: i64 = 5_000;
pub const FIXED_WINDOW_TIMEOUT_MAX: i64 = 15_000;
pub const ALL_DAY_TIMEOUT_MIN: i64 = 20_000;
pub const ALL_DAY_TIMEOUT_MAX: i64 = 30_000;

/// When a day's celebration starts and how long it may run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationPolicy {
    /// Celebration kicks off at a fixed local hour.
    FixedWindow { start_hour: u32 },
    /// Celebration kicks off at local hour zero and runs long.
    AllDay,
}

impl DurationPolicy {
    /// Local hour the celebration trigger fires at.
    pub fn start_hour(self) -> u32 {
        match self {
            DurationPolicy::FixedWindow { start_hour } => start_hour,
            DurationPolicy::AllDay => 0,
        }
    }

    /// Range the session timeout is drawn from, in ticks.
    pub fn timeout_range(self) -> RangeInclusive<i64> {
        match self {
            DurationPolicy::FixedWindow { .. } => {
                FIXED_WINDOW_TIMEOUT_MIN..=FIXED_WINDOW_TIMEOUT_MAX
            }
            DurationPolicy::AllDay => ALL_DAY_TIMEOUT_MIN..=ALL_DAY_TIMEOUT_MAX,
        }
    }
}

/// The four always-present event categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BuiltInDay {
    Settlement,
    Birthdays,
    MarriageAnniversaries,
    LoversAnniversaries,
}

impl BuiltInDay {
    pub const ALL: [BuiltInDay; 4] = [
        BuiltInDay::Settlement,
        BuiltInDay::Birthdays,
        BuiltInDay::MarriageAnniversaries,
        BuiltInDay::LoversAnniversaries,
    ];
}

/// A user-defined day of note.
///
/// `day_of_quadrum` is stored one-based (1–15), the way dates are shown to
/// players; the matcher subtracts one to compare against the zero-based
/// calendar day. Out-of-range values are a caller error and simply never
/// match, they are not clamped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatteredDay {
    pub name: String,
    pub quadrum: Quadrum,
    pub day_of_quadrum: u32,
    pub policy: DurationPolicy,
}

impl MatteredDay {
    pub fn new(name: impl Into<String>, quadrum: Quadrum, day_of_quadrum: u32) -> Self {
        Self {
            name: name.into(),
            quadrum,
            day_of_quadrum,
            policy: DurationPolicy::AllDay,
        }
    }

    pub fn with_policy(mut self, policy: DurationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Calendar label, e.g. "Zenith 5".
    pub fn date_label(&self) -> String {
        format!("{} {}", self.quadrum, self.day_of_quadrum)
    }
}

/// A grid cell on the active map.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// How a notice reads to the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Positive,
    Negative,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_start_hours() {
        assert_eq!(DurationPolicy::FixedWindow { start_hour: 17 }.start_hour(), 17);
        assert_eq!(DurationPolicy::AllDay.start_hour(), 0);
    }

    #[test]
    fn policy_timeout_ranges() {
        let fixed = DurationPolicy::FixedWindow { start_hour: 14 }.timeout_range();
        assert_eq!(fixed, 5_000..=15_000);
        assert_eq!(DurationPolicy::AllDay.timeout_range(), 20_000..=30_000);
    }

    #[test]
    fn mattered_day_round_trips_through_json() {
        let day = MatteredDay::new("Founding Fair", Quadrum::Zenith, 5)
            .with_policy(DurationPolicy::FixedWindow { start_hour: 13 });
        let json = serde_json::to_string(&day).unwrap();
        let back: MatteredDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, day);
        assert_eq!(back.date_label(), "Zenith 5");
    }

    #[test]
    fn cells_order_lexicographically() {
        let mut cells = vec![Cell::new(3, 1), Cell::new(1, 9), Cell::new(1, 2)];
        cells.sort();
        assert_eq!(cells, vec![Cell::new(1, 2), Cell::new(1, 9), Cell::new(3, 1)]);
    }
}
