use std::collections::BTreeSet;

use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::ecs::components::{
    Celebration, CelebrationCore, CelebrationState, Faction, IsPlayer, Person, PersonCore,
    SimEntity,
};
use crate::ecs::relationships::MemberOf;
use crate::ecs::resources::SimIds;
use crate::model::{Cell, DurationPolicy};

fn next_id(world: &mut World) -> u64 {
    world.resource_mut::<SimIds>().next_id()
}

pub fn spawn_faction(world: &mut World, name: impl Into<String>, player: bool) -> Entity {
    let id = next_id(world);
    let mut entity = world.spawn((SimEntity::new(id, name), Faction));
    if player {
        entity.insert(IsPlayer);
    }
    entity.id()
}

pub fn spawn_person(
    world: &mut World,
    name: impl Into<String>,
    faction: Entity,
    core: PersonCore,
) -> Entity {
    let id = next_id(world);
    world
        .spawn((SimEntity::new(id, name), Person, core, MemberOf(faction)))
        .id()
}

/// Spawn an already-running open session, the way a host restores one from a
/// save. Celebrations born from occasions go through `try_start_celebration`
/// instead.
pub fn spawn_celebration(
    world: &mut World,
    spot: Cell,
    policy: DurationPolicy,
    started_at: i64,
    timeout_ticks: i64,
) -> Entity {
    let id = next_id(world);
    world
        .spawn((
            SimEntity::new(id, format!("Celebration at {spot}")),
            Celebration,
            CelebrationCore {
                spot,
                policy,
                started_at,
                timeout_ticks,
                invited: None,
                organizer: None,
                members: BTreeSet::new(),
            },
            CelebrationState::Active,
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_entities_get_distinct_ids() {
        let mut world = World::new();
        world.insert_resource(SimIds::default());

        let faction = spawn_faction(&mut world, "New Dawn", true);
        let person = spawn_person(&mut world, "Ada", faction, PersonCore::default());

        let faction_id = world.get::<SimEntity>(faction).unwrap().id;
        let person_id = world.get::<SimEntity>(person).unwrap().id;
        assert_ne!(faction_id, person_id);
        assert!(world.get::<IsPlayer>(faction).is_some());
        assert_eq!(world.get::<MemberOf>(person).unwrap().0, faction);
    }

    #[test]
    fn non_player_factions_lack_the_marker() {
        let mut world = World::new();
        world.insert_resource(SimIds::default());
        let rivals = spawn_faction(&mut world, "Rivals", false);
        assert!(world.get::<IsPlayer>(rivals).is_none());
    }
}
