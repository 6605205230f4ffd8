use bevy_ecs::component::Component;

/// Core identity component present on every ECS entity the engine tracks.
#[derive(Component, Debug, Clone)]
pub struct SimEntity {
    pub id: u64,
    pub name: String,
    /// Absolute tick the entity ended (died, was destroyed, wound down).
    pub end: Option<i64>,
}

impl SimEntity {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            end: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.end.is_none()
    }
}

// ---------------------------------------------------------------------------
// Marker components, one per entity kind
// ---------------------------------------------------------------------------

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Person;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Faction;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Celebration;

// ---------------------------------------------------------------------------
// Meta-markers
// ---------------------------------------------------------------------------

/// Marks the player-controlled faction.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct IsPlayer;
