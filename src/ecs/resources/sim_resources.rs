use std::collections::BTreeSet;

use bevy_ecs::resource::Resource;
use rand::rngs::SmallRng;

use crate::model::Cell;

/// Deterministic RNG for the simulation.
#[derive(Resource)]
pub struct SimRng {
    pub rng: SmallRng,
    pub seed: u64,
}

/// Player-tunable behavior.
#[derive(Resource, Debug, Clone)]
pub struct Settings {
    /// When on, anniversary celebrations admit only the couple involved;
    /// when off every anniversary is open to the whole faction.
    pub private_anniversaries: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            private_anniversaries: true,
        }
    }
}

/// The host's currently active map, summarized to what the engine needs.
///
/// Inserted and removed by the host; while absent the matcher skips its scan
/// entirely and any running celebration is called off.
#[derive(Resource, Debug, Clone)]
pub struct ActiveMap {
    /// Degrees east of the prime meridian; shifts the local hour.
    pub longitude: f32,
    /// Candidate gathering cells, host-curated.
    pub gathering_spots: Vec<Cell>,
    pub roofed: BTreeSet<Cell>,
}

impl ActiveMap {
    pub fn new(longitude: f32) -> Self {
        Self {
            longitude,
            gathering_spots: Vec::new(),
            roofed: BTreeSet::new(),
        }
    }

    pub fn is_roofed(&self, cell: Cell) -> bool {
        self.roofed.contains(&cell)
    }
}

/// The host's weather/incident verdicts relevant to gatherings.
#[derive(Resource, Debug, Clone)]
pub struct WorldConditions {
    /// False while world conditions make gathering unacceptable.
    pub gatherings_acceptable: bool,
    /// Whether being outdoors is currently pleasant.
    pub enjoyable_outside: bool,
}

impl Default for WorldConditions {
    fn default() -> Self {
        Self {
            gatherings_acceptable: true,
            enjoyable_outside: true,
        }
    }
}

/// Counter handing out ids for spawned sim entities.
#[derive(Resource, Debug)]
pub struct SimIds {
    next: u64,
}

impl SimIds {
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for SimIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}
