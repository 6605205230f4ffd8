use bevy_ecs::entity::Entity;
use bevy_ecs::message::Message;

use crate::model::DurationPolicy;

/// What kind of day matched.
#[derive(Clone, Debug, PartialEq)]
pub enum Occasion {
    SettlementAnniversary { years: i32 },
    MarriageAnniversary { a: Entity, b: Entity },
    LoversAnniversary { a: Entity, b: Entity },
    Birthday { person: Entity, age: i32 },
    MatteredDay { name: String },
}

/// How a matched day reaches the player.
#[derive(Clone, Debug, PartialEq)]
pub enum Delivery {
    /// One-line notice, nothing scheduled.
    Notice,
    /// Kick off a celebration session.
    Celebration {
        policy: DurationPolicy,
        /// Guests to restrict to when anniversaries are private; empty means
        /// open to the whole faction.
        invited: Vec<Entity>,
        /// Preset organizer; `None` means pick one at delivery time.
        organizer: Option<Entity>,
    },
}

/// A calendar match produced by the hourly scan.
///
/// The matcher only detects. The occasion applicator in `SimPhase::PostUpdate`
/// drains these and posts the notice or attempts the session start.
#[derive(Message, Clone, Debug)]
pub struct OccasionFired {
    pub occasion: Occasion,
    pub delivery: Delivery,
}

/// Host signal that a pawn died violently this tick. Any active session the
/// pawn was attending is called off.
#[derive(Message, Clone, Debug)]
pub struct PawnLostViolently {
    pub pawn: Entity,
}
