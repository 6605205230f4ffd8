pub mod celebration;
pub mod common;
pub mod person;

pub use celebration::{CelebrationCore, CelebrationState};
pub use common::{Celebration, Faction, IsPlayer, Person, SimEntity};
pub use person::PersonCore;
