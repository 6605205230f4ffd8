use bevy_app::App;

use crate::calendar::{TICKS_PER_DAY, TICKS_PER_HOUR};
use crate::ecs::clock::SimClock;
use crate::ecs::schedule::SimTick;

/// Run the simulation schedule `n` times.
pub fn run_ticks(app: &mut App, n: i64) {
    for _ in 0..n {
        app.world_mut().run_schedule(SimTick);
    }
}

/// Run `n` hours worth of ticks.
pub fn tick_hours(app: &mut App, n: i64) {
    run_ticks(app, n * TICKS_PER_HOUR);
}

/// Run `n` days worth of ticks.
pub fn tick_days(app: &mut App, n: i64) {
    run_ticks(app, n * TICKS_PER_DAY);
}

/// Jump the clock to an absolute tick without running any systems, the way a
/// host restores a saved game mid-world. The world start tick is untouched.
pub fn warp_to_tick(app: &mut App, abs_tick: i64) {
    app.world_mut().resource_mut::<SimClock>().abs_tick = abs_tick;
}

/// Current absolute tick from the clock resource.
pub fn current_tick(app: &App) -> i64 {
    app.world().resource::<SimClock>().abs_tick
}
