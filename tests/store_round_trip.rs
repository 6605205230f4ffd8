use red_letter::ecs::test_helpers::{run_ticks, warp_to_tick};
use red_letter::ecs::{ActiveMap, MatteredDayStore, NoticeBoard, RedLetterPlugin, build_sim_app};
use red_letter::save::{read_store, write_store};
use red_letter::{BuiltInDay, DurationPolicy, MatteredDay, Quadrum, TICKS_PER_QUADRUM};

fn seasoned_store() -> MatteredDayStore {
    let mut store = MatteredDayStore::new();
    store.set_built_in(BuiltInDay::Birthdays, DurationPolicy::AllDay);
    store.set_built_in(
        BuiltInDay::Settlement,
        DurationPolicy::FixedWindow { start_hour: 8 },
    );
    store.add_custom_day(MatteredDay::new("Harvest Fair", Quadrum::Zenith, 7));
    store.add_custom_day(
        MatteredDay::new("Landing Day", Quadrum::Fade, 1)
            .with_policy(DurationPolicy::FixedWindow { start_hour: 12 }),
    );
    store
}

#[test]
fn store_survives_a_save_cycle() {
    let store = seasoned_store();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("days.json");

    write_store(&store, &path).unwrap();
    let restored = read_store(&path).unwrap();

    assert_eq!(restored, store);
}

#[test]
fn saved_file_is_plain_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("days.json");
    write_store(&seasoned_store(), &path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(v.get("settlement").is_some());
    assert!(v.get("birthdays").is_some());
    assert_eq!(v["mattered_days"].as_array().unwrap().len(), 2);
    assert_eq!(v["mattered_days"][1]["name"], "Landing Day");
}

#[test]
fn restored_store_drives_a_fresh_world() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("days.json");
    write_store(&seasoned_store(), &path).unwrap();

    let mut app = build_sim_app(0);
    app.add_plugins(RedLetterPlugin);
    app.insert_resource(read_store(&path).unwrap());
    app.insert_resource(ActiveMap::new(0.0));

    // Landing Day is stored as Fade 1, the first day of Fade.
    warp_to_tick(&mut app, 2 * TICKS_PER_QUADRUM);
    run_ticks(&mut app, 1);

    let notices: Vec<String> = app
        .world()
        .resource::<NoticeBoard>()
        .notices
        .iter()
        .map(|n| n.text.clone())
        .collect();
    assert_eq!(notices, vec!["Today is Landing Day!".to_string()]);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(read_store(&dir.path().join("no-such-days.json")).is_err());
}
