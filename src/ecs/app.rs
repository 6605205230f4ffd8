use bevy_app::App;
use bevy_ecs::message::MessageRegistry;
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::clock::SimClock;
use super::messages::{OccasionFired, PawnLostViolently};
use super::relationships::RelationGraph;
use super::resources::{
    MatteredDayStore, NoticeBoard, Settings, SimIds, SimRng, WorldConditions,
};
use super::schedule::{SimPhase, configure_sim_schedule};
use super::systems::occasions::apply_occasions;

/// Build a headless Bevy app with the simulation clock, core resources,
/// message types, and the occasion applicator.
///
/// The app carries no `ActiveMap`; the host inserts one when a map is loaded
/// and removes it when the map goes away. Map-dependent systems skip silently
/// while it is absent.
///
/// Manual tick control:
/// ```no_run
/// # use red_letter::ecs::{build_sim_app, SimTick};
/// let mut app = build_sim_app(0);
/// for _ in 0..60_000 { // one day of ticks
///     app.world_mut().run_schedule(SimTick);
/// }
/// ```
pub fn build_sim_app(start_tick: i64) -> App {
    build_sim_app_seeded(start_tick, 42)
}

/// Build a headless Bevy app with a specific RNG seed and multi-threaded executor.
pub fn build_sim_app_seeded(start_tick: i64, seed: u64) -> App {
    build_sim_app_with_executor(start_tick, seed, ExecutorKind::MultiThreaded)
}

/// Build a headless Bevy app with single-threaded executor for reproducible determinism.
///
/// Use this when exact RNG consumption order across ticks must be identical across runs.
pub fn build_sim_app_deterministic(start_tick: i64, seed: u64) -> App {
    build_sim_app_with_executor(start_tick, seed, ExecutorKind::SingleThreaded)
}

/// Build a headless Bevy app with a specific executor kind.
pub fn build_sim_app_with_executor(start_tick: i64, seed: u64, executor: ExecutorKind) -> App {
    let mut app = App::empty();

    // Core resources
    app.insert_resource(SimClock::new(start_tick));
    app.insert_resource(MatteredDayStore::new());
    app.insert_resource(NoticeBoard::new());
    app.insert_resource(RelationGraph::new());
    app.insert_resource(Settings::default());
    app.insert_resource(WorldConditions::default());
    app.insert_resource(SimIds::default());
    app.insert_resource(SimRng {
        rng: SmallRng::seed_from_u64(seed),
        seed,
    });

    // Register message types
    MessageRegistry::register_message::<OccasionFired>(app.world_mut());
    MessageRegistry::register_message::<PawnLostViolently>(app.world_mut());

    // Build schedule with message rotation + occasion applicator
    let mut schedule = configure_sim_schedule(executor);
    schedule.add_systems(bevy_ecs::message::message_update_system.in_set(SimPhase::PreUpdate));
    schedule.add_systems(apply_occasions.in_set(SimPhase::PostUpdate));
    app.add_schedule(schedule);

    tracing::debug!(start_tick, seed, "simulation app built");
    app
}
