use bevy_ecs::component::Component;

/// Core person identity.
///
/// `willing` is the host's mood/needs verdict on attending gatherings; the
/// engine never computes it, only reads it.
#[derive(Component, Debug, Clone)]
pub struct PersonCore {
    /// Absolute tick of birth (may precede the world epoch).
    pub born_tick: i64,
    pub humanlike: bool,
    pub willing: bool,
}

impl PersonCore {
    pub fn born_at(born_tick: i64) -> Self {
        Self {
            born_tick,
            ..Self::default()
        }
    }
}

impl Default for PersonCore {
    fn default() -> Self {
        Self {
            born_tick: 0,
            humanlike: true,
            willing: true,
        }
    }
}
