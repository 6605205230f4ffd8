//! Celebration session lifecycle.
//!
//! Three systems run every tick, chained: `step_celebrations` decides which
//! active sessions end this tick (call-off or timeout), `update_attendance`
//! moves pawns in and out of the surviving sessions, and
//! `finish_celebrations` retires sessions marked `Ending`. Stepping runs
//! first so a violent pawn loss is judged against the membership the pawn
//! actually had.

use std::collections::BTreeSet;

use bevy_app::{App, Plugin};
use bevy_ecs::entity::Entity;
use bevy_ecs::message::MessageReader;
use bevy_ecs::query::With;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res, ResMut};

use crate::ecs::clock::SimClock;
use crate::ecs::components::{
    Celebration, CelebrationCore, CelebrationState, Faction, IsPlayer, Person, PersonCore,
    SimEntity,
};
use crate::ecs::messages::PawnLostViolently;
use crate::ecs::relationships::MemberOf;
use crate::ecs::resources::{ActiveMap, NoticeBoard, WorldConditions};
use crate::ecs::schedule::{DomainSet, SimTick};
use crate::model::Tone;

/// Priority a pawn reports for joining a celebration it is welcome at.
pub const GUEST_JOIN_PRIORITY: f32 = 20.0;
/// Nobody new bothers joining with less than this left on the clock.
pub const LATE_JOIN_CUTOFF_TICKS: i64 = 1_200;

pub(crate) const CALLED_OFF_TEXT: &str = "The celebration was called off.";
pub(crate) const WOUND_DOWN_TEXT: &str = "The celebration is over.";

// ---------------------------------------------------------------------------
// Plugin registration
// ---------------------------------------------------------------------------

pub struct CelebrationsPlugin;

impl Plugin for CelebrationsPlugin {
    fn build(&self, app: &mut App) {
        add_celebration_systems(app);
    }
}

pub fn add_celebration_systems(app: &mut App) {
    app.add_systems(
        SimTick,
        (step_celebrations, update_attendance, finish_celebrations)
            .chain()
            .in_set(DomainSet::Celebrations),
    );
}

// ---------------------------------------------------------------------------
// Voluntary-join gate
// ---------------------------------------------------------------------------

/// One pawn's standing when a session asks who would attend.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub entity: Entity,
    pub player_allied: bool,
    pub humanlike: bool,
    pub willing: bool,
}

/// Priority with which a pawn would join (or stay at) a session.
///
/// Zero means stay away or walk out. Existing members are exempt from the
/// late-join cutoff, so a pawn already attending keeps its place until the
/// session actually ends.
pub fn voluntary_join_priority(
    core: &CelebrationCore,
    state: CelebrationState,
    now: i64,
    candidate: &Candidate,
) -> f32 {
    if !state.is_active() {
        return 0.0;
    }
    if !candidate.player_allied || !candidate.humanlike {
        return 0.0;
    }
    if !core.is_invited(candidate.entity) {
        return 0.0;
    }
    if !candidate.willing {
        return 0.0;
    }
    let member = core.members.contains(&candidate.entity);
    if !member && core.ticks_left(now) < LATE_JOIN_CUTOFF_TICKS {
        return 0.0;
    }
    GUEST_JOIN_PRIORITY
}

// ---------------------------------------------------------------------------
// Per-tick systems
// ---------------------------------------------------------------------------

/// End active sessions whose conditions failed or whose clock ran out.
pub fn step_celebrations(
    clock: Res<SimClock>,
    conditions: Res<WorldConditions>,
    map: Option<Res<ActiveMap>>,
    mut lost: MessageReader<PawnLostViolently>,
    mut sessions: Query<(&CelebrationCore, &mut CelebrationState), With<Celebration>>,
    mut board: ResMut<NoticeBoard>,
) {
    let now = clock.abs_tick;
    let lost_pawns: BTreeSet<Entity> = lost.read().map(|msg| msg.pawn).collect();

    for (core, mut state) in sessions.iter_mut() {
        if !state.is_active() {
            continue;
        }

        let sheltered = map.as_ref().is_some_and(|m| m.is_roofed(core.spot));
        let called_off = map.is_none()
            || !conditions.gatherings_acceptable
            || (!sheltered && !conditions.enjoyable_outside)
            || lost_pawns.iter().any(|pawn| core.members.contains(pawn));
        if called_off {
            board.post_notice(CALLED_OFF_TEXT, Tone::Negative, now);
            *state = CelebrationState::Ending;
            continue;
        }

        if now - core.started_at >= core.timeout_ticks {
            board.post_notice(WOUND_DOWN_TEXT, Tone::Negative, now);
            *state = CelebrationState::Ending;
        }
    }
}

/// Move pawns in and out of the sessions that survived stepping.
#[allow(clippy::type_complexity)]
pub fn update_attendance(
    clock: Res<SimClock>,
    player_factions: Query<Entity, (With<Faction>, With<IsPlayer>)>,
    persons: Query<(Entity, &SimEntity, &PersonCore, &MemberOf), With<Person>>,
    mut sessions: Query<(&mut CelebrationCore, &CelebrationState), With<Celebration>>,
) {
    let now = clock.abs_tick;
    let player = player_factions.iter().next();

    let mut living: BTreeSet<Entity> = BTreeSet::new();
    let mut candidates: Vec<Candidate> = Vec::new();
    for (entity, sim, core, member_of) in persons.iter() {
        if !sim.is_alive() {
            continue;
        }
        living.insert(entity);
        candidates.push(Candidate {
            entity,
            player_allied: player == Some(member_of.0),
            humanlike: core.humanlike,
            willing: core.willing,
        });
    }

    for (mut core, state) in sessions.iter_mut() {
        if !state.is_active() {
            continue;
        }
        core.members.retain(|member| living.contains(member));

        for candidate in &candidates {
            let member = core.members.contains(&candidate.entity);
            let priority = voluntary_join_priority(&core, *state, now, candidate);
            if priority > 0.0 && !member {
                core.members.insert(candidate.entity);
            } else if priority == 0.0 && member {
                core.members.remove(&candidate.entity);
            }
        }
    }
}

/// Retire sessions marked `Ending`: clear membership, stamp the end tick.
#[allow(clippy::type_complexity)]
pub fn finish_celebrations(
    clock: Res<SimClock>,
    mut sessions: Query<
        (&mut SimEntity, &mut CelebrationCore, &mut CelebrationState),
        With<Celebration>,
    >,
) {
    let now = clock.abs_tick;
    for (mut sim, mut core, mut state) in sessions.iter_mut() {
        if *state != CelebrationState::Ending {
            continue;
        }
        core.members.clear();
        sim.end = Some(now);
        *state = CelebrationState::Ended;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::app::build_sim_app_seeded;
    use crate::ecs::messages::PawnLostViolently;
    use crate::ecs::spawn::{spawn_celebration, spawn_faction, spawn_person};
    use crate::ecs::test_helpers::{run_ticks, warp_to_tick};
    use crate::model::{Cell, DurationPolicy};
    use bevy_ecs::message::Messages;

    const SPOT: Cell = Cell { x: 2, z: 2 };
    const POLICY: DurationPolicy = DurationPolicy::FixedWindow { start_hour: 17 };
    const TIMEOUT: i64 = 10_000;

    fn gate_core(members: &[Entity]) -> CelebrationCore {
        CelebrationCore {
            spot: SPOT,
            policy: POLICY,
            started_at: 0,
            timeout_ticks: TIMEOUT,
            invited: None,
            organizer: None,
            members: members.iter().copied().collect(),
        }
    }

    fn guest(entity: Entity) -> Candidate {
        Candidate {
            entity,
            player_allied: true,
            humanlike: true,
            willing: true,
        }
    }

    fn dummy_pair() -> (Entity, Entity) {
        let mut world = bevy_ecs::world::World::new();
        (world.spawn_empty().id(), world.spawn_empty().id())
    }

    #[test]
    fn gate_admits_welcome_guests() {
        let (pawn, _) = dummy_pair();
        let core = gate_core(&[]);
        let p = voluntary_join_priority(&core, CelebrationState::Active, 5_000, &guest(pawn));
        assert_eq!(p, GUEST_JOIN_PRIORITY);
    }

    #[test]
    fn gate_rejects_by_each_rule() {
        let (pawn, other) = dummy_pair();
        let core = gate_core(&[]);
        let now = 5_000;

        for state in [CelebrationState::Ending, CelebrationState::Ended] {
            assert_eq!(voluntary_join_priority(&core, state, now, &guest(pawn)), 0.0);
        }

        let mut outsider = guest(pawn);
        outsider.player_allied = false;
        assert_eq!(
            voluntary_join_priority(&core, CelebrationState::Active, now, &outsider),
            0.0
        );

        let mut beast = guest(pawn);
        beast.humanlike = false;
        assert_eq!(
            voluntary_join_priority(&core, CelebrationState::Active, now, &beast),
            0.0
        );

        let mut grump = guest(pawn);
        grump.willing = false;
        assert_eq!(
            voluntary_join_priority(&core, CelebrationState::Active, now, &grump),
            0.0
        );

        let mut closed = gate_core(&[]);
        closed.invited = Some([other].into_iter().collect());
        assert_eq!(
            voluntary_join_priority(&closed, CelebrationState::Active, now, &guest(pawn)),
            0.0
        );
        assert_eq!(
            voluntary_join_priority(&closed, CelebrationState::Active, now, &guest(other)),
            GUEST_JOIN_PRIORITY
        );
    }

    #[test]
    fn gate_blocks_latecomers_but_not_members() {
        let (pawn, _) = dummy_pair();
        // 1,000 ticks left on the clock, under the cutoff.
        let now = TIMEOUT - 1_000;

        let core = gate_core(&[]);
        assert_eq!(
            voluntary_join_priority(&core, CelebrationState::Active, now, &guest(pawn)),
            0.0
        );

        let core = gate_core(&[pawn]);
        assert_eq!(
            voluntary_join_priority(&core, CelebrationState::Active, now, &guest(pawn)),
            GUEST_JOIN_PRIORITY
        );
    }

    // -- system tests --------------------------------------------------------

    fn setup_app() -> (bevy_app::App, Entity, Entity) {
        let mut app = build_sim_app_seeded(0, 11);
        add_celebration_systems(&mut app);

        let mut map = ActiveMap::new(0.0);
        map.gathering_spots.push(SPOT);
        map.roofed.insert(SPOT);
        app.insert_resource(map);

        let faction = spawn_faction(app.world_mut(), "New Dawn", true);
        let a = spawn_person(app.world_mut(), "Ada", faction, PersonCore::default());
        let b = spawn_person(app.world_mut(), "Brin", faction, PersonCore::default());
        (app, a, b)
    }

    fn session_view(app: &bevy_app::App, session: Entity) -> (CelebrationCore, CelebrationState) {
        let world = app.world();
        let core = world.get::<CelebrationCore>(session).cloned();
        let state = world.get::<CelebrationState>(session).copied();
        (core.unwrap(), state.unwrap())
    }

    fn notice_texts(app: &bevy_app::App) -> Vec<String> {
        app.world()
            .resource::<NoticeBoard>()
            .notices
            .iter()
            .map(|n| n.text.clone())
            .collect()
    }

    #[test]
    fn pawns_join_an_active_session() {
        let (mut app, a, b) = setup_app();
        let session = spawn_celebration(app.world_mut(), SPOT, POLICY, 0, TIMEOUT);

        run_ticks(&mut app, 1);

        let (core, state) = session_view(&app, session);
        assert_eq!(state, CelebrationState::Active);
        assert_eq!(core.members, [a, b].into_iter().collect());
    }

    #[test]
    fn session_winds_down_after_timeout() {
        let (mut app, ..) = setup_app();
        let session = spawn_celebration(app.world_mut(), SPOT, POLICY, 0, TIMEOUT);

        run_ticks(&mut app, TIMEOUT + 1);

        let (core, state) = session_view(&app, session);
        assert_eq!(state, CelebrationState::Ended);
        assert!(core.members.is_empty());
        let end = app.world().get::<SimEntity>(session).unwrap().end;
        assert_eq!(end, Some(TIMEOUT));

        let winds = notice_texts(&app)
            .iter()
            .filter(|t| *t == WOUND_DOWN_TEXT)
            .count();
        assert_eq!(winds, 1, "exactly one wind-down notice");

        // The session entity stays around, inert.
        run_ticks(&mut app, 500);
        let (_, state) = session_view(&app, session);
        assert_eq!(state, CelebrationState::Ended);
    }

    #[test]
    fn unacceptable_conditions_call_the_session_off() {
        let (mut app, ..) = setup_app();
        let session = spawn_celebration(app.world_mut(), SPOT, POLICY, 0, TIMEOUT);
        run_ticks(&mut app, 1);

        app.world_mut()
            .resource_mut::<WorldConditions>()
            .gatherings_acceptable = false;
        run_ticks(&mut app, 1);

        let (core, state) = session_view(&app, session);
        assert_eq!(state, CelebrationState::Ended);
        assert!(core.members.is_empty());
        assert!(notice_texts(&app).contains(&CALLED_OFF_TEXT.to_string()));
    }

    #[test]
    fn bad_weather_only_matters_without_a_roof() {
        // Unroofed spot: souring the outdoors calls the session off.
        let (mut app, ..) = setup_app();
        app.world_mut().resource_mut::<ActiveMap>().roofed.clear();
        let session = spawn_celebration(app.world_mut(), SPOT, POLICY, 0, TIMEOUT);
        run_ticks(&mut app, 1);
        app.world_mut()
            .resource_mut::<WorldConditions>()
            .enjoyable_outside = false;
        run_ticks(&mut app, 1);
        let (_, state) = session_view(&app, session);
        assert_eq!(state, CelebrationState::Ended);

        // Roofed spot: the same weather is shrugged off.
        let (mut app, ..) = setup_app();
        let session = spawn_celebration(app.world_mut(), SPOT, POLICY, 0, TIMEOUT);
        run_ticks(&mut app, 1);
        app.world_mut()
            .resource_mut::<WorldConditions>()
            .enjoyable_outside = false;
        run_ticks(&mut app, 1);
        let (_, state) = session_view(&app, session);
        assert_eq!(state, CelebrationState::Active);
    }

    #[test]
    fn losing_the_map_calls_the_session_off() {
        let (mut app, ..) = setup_app();
        let session = spawn_celebration(app.world_mut(), SPOT, POLICY, 0, TIMEOUT);
        run_ticks(&mut app, 1);

        app.world_mut().remove_resource::<ActiveMap>();
        run_ticks(&mut app, 1);

        let (_, state) = session_view(&app, session);
        assert_eq!(state, CelebrationState::Ended);
    }

    #[test]
    fn violent_loss_of_a_member_calls_the_session_off() {
        let (mut app, a, _) = setup_app();
        let session = spawn_celebration(app.world_mut(), SPOT, POLICY, 0, TIMEOUT);
        run_ticks(&mut app, 1);

        // The host stamps the death and reports it in the same tick.
        app.world_mut().get_mut::<SimEntity>(a).unwrap().end = Some(1);
        app.world_mut()
            .resource_mut::<Messages<PawnLostViolently>>()
            .write(PawnLostViolently { pawn: a });
        run_ticks(&mut app, 1);

        let (_, state) = session_view(&app, session);
        assert_eq!(state, CelebrationState::Ended);
        assert!(notice_texts(&app).contains(&CALLED_OFF_TEXT.to_string()));
    }

    #[test]
    fn violent_loss_of_a_bystander_changes_nothing() {
        let (mut app, ..) = setup_app();
        // Raiders never attend, so a dead raider is no reason to stop.
        let rivals = spawn_faction(app.world_mut(), "Rivals", false);
        let raider = spawn_person(app.world_mut(), "Raider", rivals, PersonCore::default());
        let session = spawn_celebration(app.world_mut(), SPOT, POLICY, 0, TIMEOUT);
        run_ticks(&mut app, 1);

        app.world_mut().get_mut::<SimEntity>(raider).unwrap().end = Some(1);
        app.world_mut()
            .resource_mut::<Messages<PawnLostViolently>>()
            .write(PawnLostViolently { pawn: raider });
        run_ticks(&mut app, 1);

        let (core, state) = session_view(&app, session);
        assert_eq!(state, CelebrationState::Active);
        assert_eq!(core.members.len(), 2);
    }

    #[test]
    fn quiet_death_prunes_without_calling_off() {
        let (mut app, a, b) = setup_app();
        let session = spawn_celebration(app.world_mut(), SPOT, POLICY, 0, TIMEOUT);
        run_ticks(&mut app, 1);

        app.world_mut().get_mut::<SimEntity>(a).unwrap().end = Some(1);
        run_ticks(&mut app, 1);

        let (core, state) = session_view(&app, session);
        assert_eq!(state, CelebrationState::Active);
        assert_eq!(core.members, [b].into_iter().collect());
    }

    #[test]
    fn unwilling_members_walk_out() {
        let (mut app, a, b) = setup_app();
        let session = spawn_celebration(app.world_mut(), SPOT, POLICY, 0, TIMEOUT);
        run_ticks(&mut app, 1);

        app.world_mut().get_mut::<PersonCore>(b).unwrap().willing = false;
        run_ticks(&mut app, 1);

        let (core, _) = session_view(&app, session);
        assert_eq!(core.members, [a].into_iter().collect());
    }

    #[test]
    fn nobody_joins_inside_the_late_window() {
        let (mut app, ..) = setup_app();
        let session = spawn_celebration(app.world_mut(), SPOT, POLICY, 0, TIMEOUT);

        warp_to_tick(&mut app, TIMEOUT - 1_000);
        run_ticks(&mut app, 1);

        let (core, state) = session_view(&app, session);
        assert_eq!(state, CelebrationState::Active);
        assert!(core.members.is_empty());
    }
}
