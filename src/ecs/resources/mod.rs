pub mod notices;
pub mod sim_resources;
pub mod store;

pub use notices::{Letter, Notice, NoticeBoard};
pub use sim_resources::{ActiveMap, Settings, SimIds, SimRng, WorldConditions};
pub use store::MatteredDayStore;
