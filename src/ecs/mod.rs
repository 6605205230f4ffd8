pub mod app;
pub mod clock;
pub mod components;
pub mod conditions;
pub mod messages;
pub mod plugin;
pub mod relationships;
pub mod resources;
pub mod schedule;
pub mod spawn;
pub mod systems;
pub mod test_helpers;

pub use app::{
    build_sim_app, build_sim_app_deterministic, build_sim_app_seeded, build_sim_app_with_executor,
};
pub use clock::SimClock;
pub use components::{
    Celebration, CelebrationCore, CelebrationState, Faction, IsPlayer, Person, PersonCore,
    SimEntity,
};
pub use conditions::{daily, hourly, yearly};
pub use messages::{Delivery, Occasion, OccasionFired, PawnLostViolently};
pub use plugin::RedLetterPlugin;
pub use relationships::{MemberOf, MemberOfSources, RelationGraph, RelationKind, RelationMeta};
pub use resources::{
    ActiveMap, Letter, MatteredDayStore, Notice, NoticeBoard, Settings, SimIds, SimRng,
    WorldConditions,
};
pub use schedule::{DomainSet, SimPhase, SimTick, configure_sim_schedule};
pub use systems::celebration::{
    Candidate, GUEST_JOIN_PRIORITY, LATE_JOIN_CUTOFF_TICKS, voluntary_join_priority,
};
pub use systems::occasions::try_start_celebration;
