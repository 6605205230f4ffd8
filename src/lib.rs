pub mod calendar;
pub mod ecs;
pub mod model;
pub mod save;

pub use calendar::{
    CalendarDate, DAYS_PER_QUADRUM, DAYS_PER_YEAR, HOURS_PER_DAY, QUADRUMS_PER_YEAR, Quadrum,
    TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_QUADRUM, TICKS_PER_YEAR,
};
pub use model::{BuiltInDay, Cell, DurationPolicy, MatteredDay, Tone};
