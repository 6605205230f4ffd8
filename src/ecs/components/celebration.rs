use std::collections::BTreeSet;

use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;

use crate::model::{Cell, DurationPolicy};

/// State of one celebration session.
#[derive(Component, Debug, Clone)]
pub struct CelebrationCore {
    /// Gathering spot the session is anchored to. The only session field the
    /// host persists across saves.
    pub spot: Cell,
    pub policy: DurationPolicy,
    /// Absolute tick the session was created at.
    pub started_at: i64,
    /// Lifetime drawn from the policy's timeout range at creation.
    pub timeout_ticks: i64,
    /// Closed guest list; `None` means open to the whole faction.
    pub invited: Option<BTreeSet<Entity>>,
    pub organizer: Option<Entity>,
    pub members: BTreeSet<Entity>,
}

impl CelebrationCore {
    /// Ticks remaining before timeout (negative once overdue).
    pub fn ticks_left(&self, now: i64) -> i64 {
        self.started_at + self.timeout_ticks - now
    }

    pub fn is_invited(&self, who: Entity) -> bool {
        match &self.invited {
            Some(set) => set.contains(&who),
            None => true,
        }
    }
}

/// Lifecycle of a celebration session.
///
/// `Ending` is a pass-through: the finish system clears membership and stamps
/// the end tick in the same tick the state was set. `Ended` sessions are
/// inert and never reused.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelebrationState {
    Active,
    Ending,
    Ended,
}

impl CelebrationState {
    pub fn is_active(self) -> bool {
        self == CelebrationState::Active
    }
}
