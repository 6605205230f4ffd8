//! Occasion delivery, the half of the engine that turns `OccasionFired`
//! messages into notices and celebration sessions.
//!
//! `apply_occasions` is an exclusive system; the app builder registers it in
//! `SimPhase::PostUpdate` so every occasion detected this tick is delivered
//! in the same tick.

use std::collections::BTreeSet;

use rand::Rng;

use bevy_ecs::entity::Entity;
use bevy_ecs::message::Messages;
use bevy_ecs::query::With;
use bevy_ecs::world::World;

use crate::ecs::clock::SimClock;
use crate::ecs::components::{
    Celebration, CelebrationCore, CelebrationState, Faction, IsPlayer, Person, PersonCore,
    SimEntity,
};
use crate::ecs::messages::{Delivery, Occasion, OccasionFired};
use crate::ecs::relationships::MemberOf;
use crate::ecs::resources::{ActiveMap, NoticeBoard, SimIds, Settings, SimRng};
use crate::model::{DurationPolicy, Tone};

pub(crate) const NO_ORGANIZER_TEXT: &str = "Nobody was in the mood to organize a celebration.";
pub(crate) const NO_SPOT_TEXT: &str = "No spot for a celebration could be found.";

/// Drain this tick's occasions and deliver each one.
pub fn apply_occasions(world: &mut World) {
    let Some(mut messages) = world.get_resource_mut::<Messages<OccasionFired>>() else {
        return;
    };
    let fired: Vec<OccasionFired> = messages.drain().collect();
    if fired.is_empty() {
        return;
    }

    let now = world.resource::<SimClock>().abs_tick;
    for OccasionFired { occasion, delivery } in fired {
        match delivery {
            Delivery::Notice => {
                let text = notice_text(world, &occasion);
                world
                    .resource_mut::<NoticeBoard>()
                    .post_notice(text, Tone::Positive, now);
            }
            Delivery::Celebration {
                policy,
                invited,
                organizer,
            } => {
                let reason = reason_text(world, &occasion);
                try_start_celebration(world, now, &reason, policy, invited, organizer);
            }
        }
    }
}

/// Try to spin up a celebration session. Hosts may call this directly for
/// ad-hoc celebrations.
///
/// A missing map is a silent skip. A missing organizer or gathering spot
/// aborts with a negative notice. Returns the session entity on success.
pub fn try_start_celebration(
    world: &mut World,
    now: i64,
    reason: &str,
    policy: DurationPolicy,
    invited: Vec<Entity>,
    organizer: Option<Entity>,
) -> Option<Entity> {
    let Some(spots) = world
        .get_resource::<ActiveMap>()
        .map(|map| map.gathering_spots.clone())
    else {
        return None;
    };

    let Some(organizer) = organizer.or_else(|| find_random_organizer(world)) else {
        world
            .resource_mut::<NoticeBoard>()
            .post_notice(NO_ORGANIZER_TEXT, Tone::Negative, now);
        tracing::debug!(reason, "celebration aborted, no organizer");
        return None;
    };

    if spots.is_empty() {
        world
            .resource_mut::<NoticeBoard>()
            .post_notice(NO_SPOT_TEXT, Tone::Negative, now);
        tracing::debug!(reason, "celebration aborted, no gathering spot");
        return None;
    }
    let index = world.resource_mut::<SimRng>().rng.random_range(0..spots.len());
    let spot = spots[index];

    // A closed guest list only applies while the privacy setting is on; an
    // empty invite list always means open to the whole faction.
    let private = world.resource::<Settings>().private_anniversaries;
    let invited: Option<BTreeSet<Entity>> =
        (private && !invited.is_empty()).then(|| invited.into_iter().collect());

    let timeout_ticks = world
        .resource_mut::<SimRng>()
        .rng
        .random_range(policy.timeout_range());

    let id = world.resource_mut::<SimIds>().next_id();
    let session = world
        .spawn((
            SimEntity::new(id, format!("Celebration: {reason}")),
            Celebration,
            CelebrationCore {
                spot,
                policy,
                started_at: now,
                timeout_ticks,
                invited,
                organizer: Some(organizer),
                members: BTreeSet::new(),
            },
            CelebrationState::Active,
        ))
        .id();

    world.resource_mut::<NoticeBoard>().post_letter(
        "A celebration!",
        format!("A celebration is starting: {reason}."),
        Tone::Positive,
        Some(spot),
        now,
    );
    tracing::debug!(reason, ?spot, timeout_ticks, "celebration started");
    Some(session)
}

/// Random living, willing humanlike of the player faction.
fn find_random_organizer(world: &mut World) -> Option<Entity> {
    let mut factions = world.query_filtered::<Entity, (With<Faction>, With<IsPlayer>)>();
    let player = factions.iter(world).next()?;

    let mut persons =
        world.query_filtered::<(Entity, &SimEntity, &PersonCore, &MemberOf), With<Person>>();
    let candidates: Vec<Entity> = persons
        .iter(world)
        .filter(|(_, sim, core, member_of)| {
            member_of.0 == player && sim.is_alive() && core.humanlike && core.willing
        })
        .map(|(entity, ..)| entity)
        .collect();
    if candidates.is_empty() {
        return None;
    }

    let index = world
        .resource_mut::<SimRng>()
        .rng
        .random_range(0..candidates.len());
    Some(candidates[index])
}

fn name_of(world: &World, entity: Entity) -> String {
    match world.get::<SimEntity>(entity) {
        Some(sim) => sim.name.clone(),
        None => {
            tracing::warn!(?entity, "occasion references a missing entity");
            "someone".to_string()
        }
    }
}

fn notice_text(world: &World, occasion: &Occasion) -> String {
    match occasion {
        Occasion::SettlementAnniversary { years } => {
            format!("Today marks {years} years since the settlement was founded!")
        }
        Occasion::MarriageAnniversary { a, b } => format!(
            "Today is {} and {}'s marriage anniversary!",
            name_of(world, *a),
            name_of(world, *b)
        ),
        Occasion::LoversAnniversary { a, b } => format!(
            "Today is the anniversary of {} and {} becoming lovers!",
            name_of(world, *a),
            name_of(world, *b)
        ),
        Occasion::Birthday { person, age } => {
            format!("Today is {}'s birthday ({})!", name_of(world, *person), age)
        }
        Occasion::MatteredDay { name } => format!("Today is {name}!"),
    }
}

fn reason_text(world: &World, occasion: &Occasion) -> String {
    match occasion {
        Occasion::SettlementAnniversary { .. } => {
            "the settlement's founding anniversary".to_string()
        }
        Occasion::MarriageAnniversary { a, b } => format!(
            "{} and {}'s marriage anniversary",
            name_of(world, *a),
            name_of(world, *b)
        ),
        Occasion::LoversAnniversary { a, b } => format!(
            "the anniversary of {} and {} becoming lovers",
            name_of(world, *a),
            name_of(world, *b)
        ),
        Occasion::Birthday { person, .. } => {
            format!("{}'s birthday", name_of(world, *person))
        }
        Occasion::MatteredDay { name } => name.clone(),
    }
}
