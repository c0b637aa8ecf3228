use super::*;
use crate::constants::{BUILDINGS_KEY, MAX_ZOOM, MIN_ZOOM, SOFT_MIN_ZOOM};
use crate::storage::{BuildingRepository, KeyValueRepository, KeyValueStore, MemoryStore};
use crate::types::{BoardConfig, BuildingKind, BuildingRecord, PlacedObject};
use crate::viewport::{PanPhase, PinchPhase};
use eframe::egui;

/// Run a single headless egui frame at clock time `time` with the provided input events.
fn run_frame(
    ctx: &egui::Context,
    time: f64,
    events: Vec<egui::Event>,
    mut f: impl FnMut(&egui::Context),
) -> egui::FullOutput {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(1200.0, 800.0),
    ));
    raw.time = Some(time);
    raw.events = events;

    ctx.run(raw, |ctx| {
        ctx.set_visuals(egui::Visuals::dark());
        f(ctx);
    })
}

fn seeded_app() -> CityApp {
    let mut store = MemoryStore::new();
    store
        .set(BUILDINGS_KEY, r#"[{"id":1,"type":"cathedral","x":2,"y":3}]"#)
        .unwrap();
    CityApp::new(
        Box::new(KeyValueRepository::new(store)),
        AppSettings::default(),
    )
}

fn press(pos: egui::Pos2, pressed: bool) -> egui::Event {
    egui::Event::PointerButton {
        pos,
        button: egui::PointerButton::Primary,
        pressed,
        modifiers: egui::Modifiers::NONE,
    }
}

fn touch(id: u64, phase: egui::TouchPhase, pos: egui::Pos2) -> egui::Event {
    egui::Event::Touch {
        device_id: egui::TouchDeviceId(0),
        id: egui::TouchId(id),
        phase,
        pos,
        force: None,
    }
}

fn wheel(lines: f32) -> egui::Event {
    egui::Event::MouseWheel {
        unit: egui::MouseWheelUnit::Line,
        delta: egui::vec2(0.0, lines),
        modifiers: egui::Modifiers::NONE,
    }
}

/// Runs one frame that shows only the board view.
fn board_frame(
    ctx: &egui::Context,
    board: &mut BoardViewState,
    time: f64,
    events: Vec<egui::Event>,
    objects: &[PlacedObject],
) {
    let _ = run_frame(ctx, time, events, |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            board.show(ui, objects, true, BoardConfig::default());
        });
    });
}

#[test]
fn app_loads_existing_buildings_on_start() {
    let app = seeded_app();
    assert_eq!(app.city.records.len(), 1);
    assert_eq!(app.city.records[0].kind, "cathedral");
    assert_eq!(app.focus.timer.duration_secs(), 25 * 60);
}

#[test]
fn completing_session_appends_selected_reward() {
    let mut app = seeded_app();
    app.settings.selected_reward = BuildingKind::House;

    app.complete_session();

    let stored = app.repository.load().unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[1].kind, "house");
    assert!((0..6).contains(&stored[1].x));
    assert!((0..6).contains(&stored[1].y));
    assert_eq!(app.city.records, stored);
    assert_eq!(app.focus.last_reward.as_ref(), Some(&stored[1]));
}

#[test]
fn timer_completion_over_frames_grants_building() {
    let mut app = CityApp::default();
    app.focus.timer.set_duration(2);
    app.focus.timer.toggle();

    let ctx = egui::Context::default();
    for time in [0.0, 0.9, 1.8, 2.7] {
        let _ = run_frame(&ctx, time, Vec::new(), |ctx| app.show(ctx));
    }

    assert!(!app.focus.timer.is_running());
    assert_eq!(app.focus.timer.remaining_secs(), 2);
    assert_eq!(app.city.records.len(), 1);
    assert_eq!(app.city.records[0].kind, "cathedral");
}

#[test]
fn selecting_city_tab_reloads_and_remounts_board() {
    let mut app = seeded_app();
    app.board.viewport.pan_x = 120.0;
    app.board.viewport.zoom = 1.8;

    // Another writer adds a building while the focus screen is visible.
    let mut records = app.repository.load().unwrap();
    records.push(BuildingRecord::new(2, BuildingKind::Tower, 4, 4));
    app.repository.save(&records).unwrap();

    app.select_tab(Tab::City);

    assert_eq!(app.tab, Tab::City);
    assert_eq!(app.city.records.len(), 2);
    assert_eq!(app.board.viewport.pan_x, 0.0);
    assert_eq!(app.board.viewport.zoom, 1.0);
}

#[test]
fn empty_city_shows_demo_building_only_when_enabled() {
    let city = CityScreenState::default();
    assert_eq!(city.placed_objects(true), vec![PlacedObject::demo()]);
    assert!(city.placed_objects(false).is_empty());
    assert_eq!(city.city_value(), 0);
}

#[test]
fn city_value_sums_catalog_costs() {
    let city = CityScreenState {
        records: vec![
            BuildingRecord::new(1, BuildingKind::Cathedral, 0, 0),
            BuildingRecord::new(2, BuildingKind::Tower, 1, 0),
            BuildingRecord {
                id: 3,
                kind: "unknown".into(),
                x: 0,
                y: 1,
            },
        ],
    };
    assert_eq!(city.city_value(), 35);
    assert_eq!(city.placed_objects(true).len(), 3);
}

#[test]
fn dragging_board_pans_viewport() {
    let mut board = BoardViewState::default();
    let objects = vec![PlacedObject::demo()];
    let config = BoardConfig::default();
    let ctx = egui::Context::default();

    let start = egui::pos2(600.0, 400.0);
    let end = egui::pos2(650.0, 430.0);
    let frames = vec![
        vec![egui::Event::PointerMoved(start)],
        vec![egui::Event::PointerMoved(start), press(start, true)],
        vec![egui::Event::PointerMoved(end)],
        vec![egui::Event::PointerMoved(end)],
    ];
    for (i, events) in frames.into_iter().enumerate() {
        let _ = run_frame(&ctx, i as f64 * 0.016, events, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                board.show(ui, &objects, true, config);
            });
        });
    }

    assert!((board.viewport.pan_x - 50.0).abs() < 1e-3);
    assert!((board.viewport.pan_y - 30.0).abs() < 1e-3);
    assert!(matches!(board.viewport.pan, PanPhase::Panning { .. }));

    for (i, events) in [vec![press(end, false)], Vec::new()].into_iter().enumerate() {
        let _ = run_frame(&ctx, 1.0 + i as f64 * 0.016, events, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                board.show(ui, &objects, true, config);
            });
        });
    }

    assert_eq!(board.viewport.pan, PanPhase::Idle);
    assert!((board.viewport.pan_x - 50.0).abs() < 1e-3);
    assert_eq!(board.viewport.zoom, 1.0);
}

#[test]
fn board_tick_finishes_settle_animation() {
    let mut board = BoardViewState::default();
    board.viewport.apply(crate::viewport::GestureEvent::PinchMove { scale: 0.3 });
    board
        .viewport
        .apply(crate::viewport::GestureEvent::PinchEnd { now: 0.0 });
    assert!(board.viewport.is_animating());

    let ctx = egui::Context::default();
    let _ = run_frame(&ctx, 5.0, Vec::new(), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            board.show(ui, &[], false, BoardConfig::default());
        });
    });

    assert_eq!(board.viewport.zoom, 0.6);
    assert_eq!(board.viewport.pinch, PinchPhase::Idle);
}

#[test]
fn full_frames_render_both_screens_and_picker() {
    let mut app = seeded_app();
    app.focus.show_reward_picker = true;
    let ctx = egui::Context::default();

    let _ = run_frame(&ctx, 0.0, Vec::new(), |ctx| app.show(ctx));
    assert!(app.focus.show_reward_picker);

    app.select_tab(Tab::City);
    let _ = run_frame(&ctx, 0.1, Vec::new(), |ctx| app.show(ctx));
    assert_eq!(app.tab, Tab::City);
    assert_eq!(app.city.records.len(), 1);
}

#[test]
fn settings_missing_fields_take_defaults() {
    let settings = AppSettings::from_json(r#"{"show_grid": false, "selected_reward": "tower"}"#)
        .unwrap();
    assert!(!settings.show_grid);
    assert_eq!(settings.selected_reward, BuildingKind::Tower);
    assert_eq!(settings.focus_minutes, 25);
    assert!(settings.dark_mode);

    let json = settings.to_json().unwrap();
    assert_eq!(AppSettings::from_json(&json).unwrap(), settings);
}

#[test]
fn restored_focus_length_applies_to_timer() {
    let settings = AppSettings {
        focus_minutes: 50,
        ..Default::default()
    };
    let app = CityApp::new(Box::new(KeyValueRepository::new(MemoryStore::new())), settings);
    assert_eq!(app.focus.timer.duration_secs(), 50 * 60);
    assert_eq!(app.focus.timer.remaining_secs(), 50 * 60);
}

#[test]
fn pinching_board_clamps_then_settles_to_soft_floor() {
    use egui::TouchPhase::{End, Move, Start};

    let mut board = BoardViewState::default();
    let ctx = egui::Context::default();
    let center = egui::pos2(600.0, 400.0);

    // egui only starts a touch gesture once it knows a pointer position.
    board_frame(&ctx, &mut board, 0.0, vec![egui::Event::PointerMoved(center)], &[]);
    board_frame(
        &ctx,
        &mut board,
        0.016,
        vec![
            touch(0, Start, egui::pos2(500.0, 400.0)),
            touch(1, Start, egui::pos2(700.0, 400.0)),
        ],
        &[],
    );
    assert_eq!(board.viewport.pinch, PinchPhase::Pinching);
    assert_eq!(board.viewport.zoom, 1.0);

    // Fingers move together to a quarter of their distance.
    board_frame(
        &ctx,
        &mut board,
        0.032,
        vec![
            touch(0, Move, egui::pos2(575.0, 400.0)),
            touch(1, Move, egui::pos2(625.0, 400.0)),
        ],
        &[],
    );
    assert_eq!(board.viewport.zoom, MIN_ZOOM);
    assert_eq!(board.viewport.pinch, PinchPhase::Pinching);

    board_frame(
        &ctx,
        &mut board,
        1.0,
        vec![
            touch(0, End, egui::pos2(575.0, 400.0)),
            touch(1, End, egui::pos2(625.0, 400.0)),
        ],
        &[],
    );
    match board.viewport.pinch {
        PinchPhase::Settling(anim) => {
            assert_eq!(anim.from, MIN_ZOOM);
            assert_eq!(anim.to, SOFT_MIN_ZOOM);
        }
        other => panic!("expected settle animation, got {other:?}"),
    }
    assert!(board.pinch_baseline.is_none());

    board_frame(&ctx, &mut board, 2.0, Vec::new(), &[]);
    assert_eq!(board.viewport.zoom, SOFT_MIN_ZOOM);
    assert_eq!(board.viewport.pinch, PinchPhase::Idle);
}

#[test]
fn scrolling_over_board_zooms_in_within_bounds() {
    let mut board = BoardViewState::default();
    let ctx = egui::Context::default();
    let over_board = egui::Event::PointerMoved(egui::pos2(600.0, 400.0));

    board_frame(&ctx, &mut board, 0.0, vec![over_board.clone()], &[]);
    board_frame(&ctx, &mut board, 0.016, vec![over_board.clone(), wheel(3.0)], &[]);
    for frame in 2..60 {
        board_frame(&ctx, &mut board, frame as f64 * 0.016, Vec::new(), &[]);
    }
    // Three lines of scroll are three notches; allow float rounding to drop the last.
    assert!(board.viewport.zoom >= 1.05 - 1e-6, "zoom {}", board.viewport.zoom);
    assert!(board.viewport.zoom <= 1.075 + 1e-6, "zoom {}", board.viewport.zoom);

    board_frame(&ctx, &mut board, 1.0, vec![over_board, wheel(100.0)], &[]);
    for frame in 1..80 {
        board_frame(&ctx, &mut board, 1.0 + frame as f64 * 0.016, Vec::new(), &[]);
    }
    assert_eq!(board.viewport.zoom, MAX_ZOOM);
}

#[test]
fn city_with_extreme_coordinates_renders() {
    let mut store = MemoryStore::new();
    store
        .set(
            BUILDINGS_KEY,
            r#"[{"id":1,"type":"house","x":2147483647,"y":-1},
                {"id":2,"type":"tower","x":-2147483648,"y":-2147483648},
                {"id":3,"type":"office","x":1,"y":1}]"#,
        )
        .unwrap();
    let mut app = CityApp::new(
        Box::new(KeyValueRepository::new(store)),
        AppSettings::default(),
    );
    app.select_tab(Tab::City);

    let ctx = egui::Context::default();
    let _ = run_frame(&ctx, 0.0, Vec::new(), |ctx| app.show(ctx));

    assert_eq!(app.city.records.len(), 3);
}
