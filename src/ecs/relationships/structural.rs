use std::ops::Deref;

use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;

// ---------------------------------------------------------------------------
// MemberOf: person → faction
// ---------------------------------------------------------------------------

#[derive(Component, Clone, Debug)]
#[relationship(relationship_target = MemberOfSources)]
pub struct MemberOf(pub Entity);

#[derive(Component, Default, Debug)]
#[relationship_target(relationship = MemberOf)]
pub struct MemberOfSources(Vec<Entity>);

impl Deref for MemberOfSources {
    type Target = [Entity];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
