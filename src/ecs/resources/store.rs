use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};

use crate::model::{BuiltInDay, DurationPolicy, MatteredDay};

/// Per-world registry of the days that matter.
///
/// Owned by exactly one world as a resource and passed around explicitly;
/// the matcher treats its absence as "not initialized here" and skips
/// silently. Serde round-trippable so the host can scribe it with the save.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatteredDayStore {
    settlement: DurationPolicy,
    birthdays: DurationPolicy,
    marriage_anniversaries: DurationPolicy,
    lovers_anniversaries: DurationPolicy,
    mattered_days: Vec<MatteredDay>,
}

impl Default for MatteredDayStore {
    fn default() -> Self {
        Self {
            settlement: DurationPolicy::FixedWindow { start_hour: 10 },
            birthdays: DurationPolicy::FixedWindow { start_hour: 14 },
            marriage_anniversaries: DurationPolicy::FixedWindow { start_hour: 17 },
            lovers_anniversaries: DurationPolicy::FixedWindow { start_hour: 19 },
            mattered_days: Vec::new(),
        }
    }
}

impl MatteredDayStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn built_in(&self, day: BuiltInDay) -> DurationPolicy {
        match day {
            BuiltInDay::Settlement => self.settlement,
            BuiltInDay::Birthdays => self.birthdays,
            BuiltInDay::MarriageAnniversaries => self.marriage_anniversaries,
            BuiltInDay::LoversAnniversaries => self.lovers_anniversaries,
        }
    }

    pub fn set_built_in(&mut self, day: BuiltInDay, policy: DurationPolicy) {
        match day {
            BuiltInDay::Settlement => self.settlement = policy,
            BuiltInDay::Birthdays => self.birthdays = policy,
            BuiltInDay::MarriageAnniversaries => self.marriage_anniversaries = policy,
            BuiltInDay::LoversAnniversaries => self.lovers_anniversaries = policy,
        }
    }

    /// Custom days in insertion order. The order is stable so hosts can use
    /// positions as display handles; duplicate names are allowed.
    pub fn custom_days(&self) -> &[MatteredDay] {
        &self.mattered_days
    }

    pub fn add_custom_day(&mut self, day: MatteredDay) {
        self.mattered_days.push(day);
    }

    /// Removes the first custom day with the given name, if any. Duplicate
    /// names are independent entries; each call peels off one.
    pub fn remove_custom_day(&mut self, name: &str) -> Option<MatteredDay> {
        let index = self.mattered_days.iter().position(|d| d.name == name)?;
        Some(self.mattered_days.remove(index))
    }
}
