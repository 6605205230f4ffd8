use bevy_ecs::system::Res;

use crate::calendar::{TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_YEAR};

use super::clock::SimClock;

// Internal check functions for testability. Boundary tests use `%` directly:
// a remainder of zero is sign-independent, so negative absolute ticks (worlds
// founded before the epoch) gate correctly too.

fn hourly_check(abs_tick: i64) -> bool {
    abs_tick % TICKS_PER_HOUR == 0
}

fn daily_check(abs_tick: i64) -> bool {
    abs_tick % TICKS_PER_DAY == 0
}

fn yearly_check(abs_tick: i64) -> bool {
    abs_tick % TICKS_PER_YEAR == 0
}

// Bevy run condition functions (for use with `.run_if()`).

pub fn hourly(clock: Res<SimClock>) -> bool {
    hourly_check(clock.abs_tick)
}

pub fn daily(clock: Res<SimClock>) -> bool {
    daily_check(clock.abs_tick)
}

pub fn yearly(clock: Res<SimClock>) -> bool {
    yearly_check(clock.abs_tick)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hourly_at_hour_boundaries() {
        assert!(hourly_check(0));
        assert!(hourly_check(TICKS_PER_HOUR));
        assert!(hourly_check(17 * TICKS_PER_HOUR));
        assert!(hourly_check(-TICKS_PER_HOUR));
    }

    #[test]
    fn hourly_not_mid_hour() {
        assert!(!hourly_check(1));
        assert!(!hourly_check(TICKS_PER_HOUR - 1));
        assert!(!hourly_check(-1));
    }

    #[test]
    fn hourly_fires_24_per_day() {
        let mut count = 0;
        for tick in 0..TICKS_PER_DAY {
            if hourly_check(tick) {
                count += 1;
            }
        }
        assert_eq!(count, 24);
    }

    #[test]
    fn daily_at_midnight_only() {
        assert!(daily_check(0));
        assert!(daily_check(3 * TICKS_PER_DAY));
        assert!(!daily_check(TICKS_PER_HOUR));
        assert!(!daily_check(TICKS_PER_DAY + 1));
    }

    #[test]
    fn yearly_at_year_boundaries() {
        assert!(yearly_check(0));
        assert!(yearly_check(TICKS_PER_YEAR));
        assert!(yearly_check(-TICKS_PER_YEAR));
        assert!(!yearly_check(TICKS_PER_DAY));
    }
}
