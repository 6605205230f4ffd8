//! Hourly calendar scan, the detection half of the engine.
//!
//! One system (`check_calendar`) walks three passes in priority order and
//! emits `OccasionFired` messages:
//! 1. settlement founding anniversary
//! 2. relation anniversaries + birthdays for living player-faction humanlikes
//! 3. custom mattered days
//!
//! Detection never mutates world state; the occasion applicator in
//! `SimPhase::PostUpdate` turns messages into notices and sessions.

use std::collections::BTreeMap;

use bevy_app::{App, Plugin};
use bevy_ecs::entity::Entity;
use bevy_ecs::message::MessageWriter;
use bevy_ecs::query::With;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res};

use crate::calendar::{CalendarDate, TICKS_PER_YEAR, years_passed_float};
use crate::ecs::clock::SimClock;
use crate::ecs::components::{Faction, IsPlayer, Person, PersonCore, SimEntity};
use crate::ecs::conditions::hourly;
use crate::ecs::messages::{Delivery, Occasion, OccasionFired};
use crate::ecs::relationships::{MemberOf, RelationGraph, RelationKind};
use crate::ecs::resources::{ActiveMap, MatteredDayStore};
use crate::ecs::schedule::{DomainSet, SimTick};
use crate::model::{BuiltInDay, DurationPolicy};

// ---------------------------------------------------------------------------
// Plugin registration
// ---------------------------------------------------------------------------

pub struct CalendarScanPlugin;

impl Plugin for CalendarScanPlugin {
    fn build(&self, app: &mut App) {
        add_matcher_systems(app);
    }
}

pub fn add_matcher_systems(app: &mut App) {
    app.add_systems(
        SimTick,
        check_calendar.run_if(hourly).in_set(DomainSet::Calendar),
    );
}

// ---------------------------------------------------------------------------
// The scan
// ---------------------------------------------------------------------------

/// Scan the calendar once per simulated hour.
///
/// Preconditions are silent skips: no active map or no store means the scan
/// simply does not run this hour.
#[allow(clippy::type_complexity)]
pub fn check_calendar(
    clock: Res<SimClock>,
    map: Option<Res<ActiveMap>>,
    store: Option<Res<MatteredDayStore>>,
    graph: Res<RelationGraph>,
    player_factions: Query<Entity, (With<Faction>, With<IsPlayer>)>,
    persons: Query<(Entity, &SimEntity, &PersonCore, &MemberOf), With<Person>>,
    mut fired: MessageWriter<OccasionFired>,
) {
    let Some(map) = map else { return };
    let Some(store) = store else { return };

    let now = clock.abs_tick;
    let today = CalendarDate::at(now, map.longitude);

    scan_settlement(&mut fired, &store, clock.world_start_tick, now, &today);

    let birthdays = store.built_in(BuiltInDay::Birthdays);
    let marriages = store.built_in(BuiltInDay::MarriageAnniversaries);
    let lovers = store.built_in(BuiltInDay::LoversAnniversaries);
    let relation_hour = today.hour == 0
        || today.hour == birthdays.start_hour()
        || today.hour == marriages.start_hour()
        || today.hour == lovers.start_hour();

    if let Some(player) = player_factions.iter().next()
        && relation_hour
    {
        // One credit map for the whole pass: each person's first un-blocked
        // relation is the only one evaluated this hour, and a pair is never
        // reported from both sides. Crediting happens before the date check.
        let mut credited: BTreeMap<Entity, Entity> = BTreeMap::new();

        for (person, sim, core, member_of) in persons.iter() {
            if member_of.0 != player || !sim.is_alive() || !core.humanlike {
                continue;
            }

            for kind in [RelationKind::Spouse, RelationKind::Lover] {
                let (policy, make_occasion): (DurationPolicy, fn(Entity, Entity) -> Occasion) =
                    match kind {
                        RelationKind::Spouse => (marriages, |a, b| Occasion::MarriageAnniversary {
                            a,
                            b,
                        }),
                        RelationKind::Lover => (lovers, |a, b| Occasion::LoversAnniversary {
                            a,
                            b,
                        }),
                    };

                for (partner, started_rel) in graph.partners_of(person, kind) {
                    if credited.contains_key(&person) || credited.contains_key(&partner) {
                        continue;
                    }
                    credited.insert(person, partner);

                    let anchor = started_rel + clock.world_start_tick;
                    if !CalendarDate::at(anchor, map.longitude).same_day_as(&today) {
                        continue;
                    }

                    if today.hour == 0 {
                        fired.write(OccasionFired {
                            occasion: make_occasion(person, partner),
                            delivery: Delivery::Notice,
                        });
                    } else if today.hour == policy.start_hour() {
                        fired.write(OccasionFired {
                            occasion: make_occasion(person, partner),
                            delivery: Delivery::Celebration {
                                policy,
                                invited: vec![person, partner],
                                organizer: Some(person),
                            },
                        });
                    }
                }
            }

            let born = CalendarDate::at(core.born_tick, map.longitude);
            if born.same_day_as(&today) {
                let age = ((now - core.born_tick) as f32 / TICKS_PER_YEAR as f32).round() as i32;
                if today.hour == 0 {
                    fired.write(OccasionFired {
                        occasion: Occasion::Birthday { person, age },
                        delivery: Delivery::Notice,
                    });
                } else if today.hour == birthdays.start_hour() {
                    fired.write(OccasionFired {
                        occasion: Occasion::Birthday { person, age },
                        delivery: Delivery::Celebration {
                            policy: birthdays,
                            invited: Vec::new(),
                            organizer: None,
                        },
                    });
                }
            }
        }
    }

    scan_custom_days(&mut fired, &store, &today);
}

/// Founding-day check. The founding date is anchored at longitude zero.
fn scan_settlement(
    fired: &mut MessageWriter<OccasionFired>,
    store: &MatteredDayStore,
    world_start_tick: i64,
    now: i64,
    today: &CalendarDate,
) {
    let founded = CalendarDate::at(world_start_tick, 0.0);
    if !founded.same_day_as(today) {
        return;
    }

    // The rounded global counter, not elapsed-since-founding: worlds founded
    // mid-year celebrate on the founding day but count whole world years.
    let years = years_passed_float(now).round() as i32;
    let policy = store.built_in(BuiltInDay::Settlement);

    if today.hour == 0 {
        fired.write(OccasionFired {
            occasion: Occasion::SettlementAnniversary { years },
            delivery: Delivery::Notice,
        });
    } else if today.hour == policy.start_hour() {
        fired.write(OccasionFired {
            occasion: Occasion::SettlementAnniversary { years },
            delivery: Delivery::Celebration {
                policy,
                invited: Vec::new(),
                organizer: None,
            },
        });
    }
}

/// Custom days fire the notice and the celebration independently, so an
/// all-day custom celebration still gets its hour-zero notice.
fn scan_custom_days(
    fired: &mut MessageWriter<OccasionFired>,
    store: &MatteredDayStore,
    today: &CalendarDate,
) {
    for day in store.custom_days() {
        let matches = day.quadrum == today.quadrum
            && i64::from(day.day_of_quadrum) - 1 == i64::from(today.day_of_quadrum);
        if !matches {
            continue;
        }

        if today.hour == 0 {
            fired.write(OccasionFired {
                occasion: Occasion::MatteredDay {
                    name: day.name.clone(),
                },
                delivery: Delivery::Notice,
            });
        }
        if today.hour == day.policy.start_hour() {
            fired.write(OccasionFired {
                occasion: Occasion::MatteredDay {
                    name: day.name.clone(),
                },
                delivery: Delivery::Celebration {
                    policy: day.policy,
                    invited: Vec::new(),
                    organizer: None,
                },
            });
        }
    }
}
