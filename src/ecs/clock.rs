use bevy_ecs::resource::Resource;
use bevy_ecs::system::ResMut;

/// Simulation clock resource tracking the absolute tick.
///
/// `abs_tick` counts ticks since the world epoch (absolute tick zero), not
/// since this session started; a host resuming a saved world seeds it with
/// the saved value, which may be far from zero or even negative. The
/// `advance_clock` system moves the clock forward at the end of each tick
/// (in `SimPhase::Last`), so systems see the current tick before it advances.
#[derive(Resource, Debug, Clone)]
pub struct SimClock {
    pub abs_tick: i64,
    /// Absolute tick the settlement was founded at.
    pub world_start_tick: i64,
    pub tick_count: u64,
}

impl SimClock {
    pub fn new(start_tick: i64) -> Self {
        Self {
            abs_tick: start_tick,
            world_start_tick: start_tick,
            tick_count: 0,
        }
    }

    /// Advance the clock by one tick.
    pub fn advance(&mut self) {
        self.abs_tick += 1;
        self.tick_count += 1;
    }

    /// Ticks elapsed since the settlement was founded.
    pub fn ticks_since_start(&self) -> i64 {
        self.abs_tick - self.world_start_tick
    }
}

/// Bevy system that advances the simulation clock by one tick.
/// Registered in `SimPhase::Last` so all other systems see the current
/// tick before it advances.
pub fn advance_clock(mut clock: ResMut<SimClock>) {
    clock.advance();
}
