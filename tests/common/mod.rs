use bevy_app::App;
use bevy_ecs::entity::Entity;
use bevy_ecs::query::With;
use red_letter::ecs::spawn::{spawn_faction, spawn_person};
use red_letter::ecs::{
    ActiveMap, Celebration, CelebrationCore, CelebrationState, NoticeBoard, PersonCore,
    RedLetterPlugin, RelationGraph, RelationKind, build_sim_app_seeded,
};
use red_letter::{Cell, TICKS_PER_DAY};

pub const SPOT: Cell = Cell { x: 8, z: 8 };

pub struct Colony {
    pub app: App,
    pub ada: Entity,
    pub brin: Entity,
    pub cole: Entity,
    pub dana: Entity,
}

/// A settled colony: one player faction, four pawns, one roofed gathering
/// spot. Ada and Brin married on day 3 of the world; Cole and Dana became
/// lovers on day 8. Birthdays all land on other days.
pub fn settled_colony(start_tick: i64, seed: u64) -> Colony {
    let mut app = build_sim_app_seeded(start_tick, seed);
    app.add_plugins(RedLetterPlugin);

    let mut map = ActiveMap::new(0.0);
    map.gathering_spots.push(SPOT);
    map.roofed.insert(SPOT);
    app.insert_resource(map);

    let world = app.world_mut();
    let faction = spawn_faction(world, "New Dawn", true);
    let ada = spawn_person(
        world,
        "Ada",
        faction,
        PersonCore::born_at(-40 * TICKS_PER_DAY),
    );
    let brin = spawn_person(
        world,
        "Brin",
        faction,
        PersonCore::born_at(-90 * TICKS_PER_DAY),
    );
    let cole = spawn_person(
        world,
        "Cole",
        faction,
        PersonCore::born_at(-95 * TICKS_PER_DAY),
    );
    let dana = spawn_person(
        world,
        "Dana",
        faction,
        PersonCore::born_at(-110 * TICKS_PER_DAY),
    );

    let mut graph = world.resource_mut::<RelationGraph>();
    graph.add(RelationKind::Spouse, ada, brin, 3 * TICKS_PER_DAY);
    graph.add(RelationKind::Lover, cole, dana, 8 * TICKS_PER_DAY);

    Colony {
        app,
        ada,
        brin,
        cole,
        dana,
    }
}

pub fn notice_texts(app: &App) -> Vec<String> {
    app.world()
        .resource::<NoticeBoard>()
        .notices
        .iter()
        .map(|n| n.text.clone())
        .collect()
}

pub fn letter_texts(app: &App) -> Vec<String> {
    app.world()
        .resource::<NoticeBoard>()
        .letters
        .iter()
        .map(|l| l.text.clone())
        .collect()
}

pub fn sessions(app: &mut App) -> Vec<(CelebrationCore, CelebrationState)> {
    let mut query = app
        .world_mut()
        .query_filtered::<(&CelebrationCore, &CelebrationState), With<Celebration>>();
    query
        .iter(app.world())
        .map(|(core, state)| (core.clone(), *state))
        .collect()
}
