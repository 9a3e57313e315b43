use spinwheel::{
    default_items, BoundaryKind, Layout, RngSource, ScriptedSource, SimulateOptions, SpinPhase,
    SteppedFrames, Tick, Wheel, WheelError, WheelGeometry, WheelItem,
};

#[test]
fn missing_storage_falls_back_to_defaults() {
    let wheel = Wheel::from_stored(None).unwrap();
    assert_eq!(wheel.items(), default_items().as_slice());
    assert_eq!(wheel.segments().len(), 6);
    assert_eq!(wheel.layout(), Layout::Weighted);
    assert_eq!(wheel.phase(), SpinPhase::Idle);
    // Unspun wheel shows the first slice under the pointer.
    assert_eq!(wheel.pointer_segment().map(|s| s.name()), Some("iPhone 15"));
}

#[test]
fn stored_items_are_validated() {
    let items = vec![
        WheelItem::new("ok", 1.0, "#000"),
        WheelItem::new("bad", -3.0, "#000"),
    ];
    assert!(matches!(
        Wheel::from_stored(Some(items)),
        Err(WheelError::InvalidWeight { index: 1, .. })
    ));

    let empty = Wheel::from_stored(Some(Vec::new())).unwrap();
    assert!(empty.segments().is_empty());
    let mut empty = empty;
    let mut source = ScriptedSource::new(vec![0.5]);
    assert_eq!(
        empty.start_spin(&mut source, 0.0),
        Err(WheelError::EmptySegmentSet)
    );
    assert_eq!(empty.phase(), SpinPhase::Idle);
}

#[test]
fn item_edits_reallocate_segments() {
    let mut wheel = Wheel::from_items(vec![WheelItem::new("a", 1.0, "#1")]).unwrap();
    assert_eq!(wheel.add_item(WheelItem::new("b", 3.0, "#2")).unwrap(), 1);
    assert_eq!(wheel.segments()[1].start_deg(), 90.0);
    assert_eq!(wheel.segments()[1].end_deg(), 360.0);

    wheel.set_weight(0, 3.0).unwrap();
    assert_eq!(wheel.segments()[0].end_deg(), 180.0);

    wheel
        .update_item(1, WheelItem::new("renamed", 1.0, "#3"))
        .unwrap();
    assert_eq!(wheel.segments()[1].name(), "renamed");
    assert!((wheel.segments()[1].probability() - 25.0).abs() < 1e-9);

    assert_eq!(wheel.remove_item(0).unwrap().name, "a");
    assert_eq!(wheel.segments().len(), 1);
    assert_eq!(wheel.segments()[0].end_deg(), 360.0);

    assert_eq!(
        wheel.remove_item(4),
        Err(WheelError::ItemOutOfRange { index: 4, len: 1 })
    );
    assert!(matches!(
        wheel.set_weight(0, 0.0),
        Err(WheelError::InvalidWeight { .. })
    ));
    // A rejected edit leaves the wheel untouched.
    assert_eq!(wheel.items()[0].weight, 1.0);

    wheel.reset_to_default().unwrap();
    assert_eq!(wheel.items(), default_items().as_slice());
}

#[test]
fn edits_are_refused_while_spinning() {
    let mut wheel = Wheel::default();
    let mut source = RngSource::seeded(4);
    wheel.start_spin(&mut source, 0.0).unwrap();

    assert_eq!(
        wheel.add_item(WheelItem::new("late", 1.0, "#000")),
        Err(WheelError::WheelBusy)
    );
    assert_eq!(wheel.reset_to_default(), Err(WheelError::WheelBusy));
    assert_eq!(
        wheel.begin_drag(0, BoundaryKind::End),
        Err(WheelError::WheelBusy)
    );
    assert!(!wheel.update_drag(20.0));
    assert_eq!(wheel.set_stop_duration_ms(500.0), Err(WheelError::WheelBusy));

    match wheel.tick(5000.0) {
        Tick::Settled(outcome) => assert!(outcome.is_consistent()),
        other => panic!("unexpected {other:?}"),
    }
    wheel.add_item(WheelItem::new("late", 1.0, "#000")).unwrap();
}

#[test]
fn pointer_readout_tracks_rotation_mid_spin() {
    let mut wheel = Wheel::default();
    let mut source = RngSource::seeded(12);
    wheel.start_spin(&mut source, 0.0).unwrap();
    for step in 1..50 {
        if let Tick::Running { rotation_deg, .. } = wheel.tick(step as f64 * 100.0) {
            let pointer = wheel.pointer_angle();
            let expected = (360.0 - rotation_deg.rem_euclid(360.0)).rem_euclid(360.0);
            assert!((pointer - expected).abs() < 1e-6 || (pointer - expected).abs() > 359.9);
            assert!(wheel.pointer_segment().is_some());
        }
    }
    let outcome = match wheel.tick(5000.0) {
        Tick::Settled(outcome) => outcome,
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(
        wheel.pointer_segment().map(|s| s.name()),
        Some(outcome.selected.name())
    );
}

#[test]
fn dragging_switches_to_manual_layout() {
    let mut wheel = Wheel::default();
    wheel.begin_drag(0, BoundaryKind::End).unwrap();
    assert!(wheel.update_drag(50.0));
    assert!(!wheel.update_drag(65.0));
    assert_eq!(wheel.end_drag().unwrap().item_index, 0);

    assert_eq!(wheel.layout(), Layout::Manual);
    assert_eq!(wheel.segments()[0].end_deg(), 50.0);
    assert_eq!(wheel.items()[0].weight, 50.0);

    // The gap [50, 60) is never selected, so every spin still lands.
    let mut source = RngSource::seeded(31);
    let mut now = 0.0;
    for _ in 0..200 {
        wheel.start_spin(&mut source, now).unwrap();
        now += 5000.0;
        match wheel.tick(now) {
            Tick::Settled(outcome) => assert!(outcome.is_consistent()),
            other => panic!("unexpected {other:?}"),
        }
    }

    // Editing items re-allocates from the span weights and closes the gap.
    wheel.add_item(WheelItem::new("extra", 60.0, "#000")).unwrap();
    assert_eq!(wheel.layout(), Layout::Weighted);
    assert_eq!(wheel.segments().last().unwrap().end_deg(), 360.0);
    for pair in wheel.segments().windows(2) {
        assert_eq!(pair[0].end_deg(), pair[1].start_deg());
    }
}

#[test]
fn invalid_drag_target_is_reported() {
    let mut wheel = Wheel::default();
    assert_eq!(
        wheel.begin_drag(9, BoundaryKind::Start),
        Err(WheelError::InvalidDragTarget { index: 9, len: 6 })
    );
    assert!(wheel.drag().is_none());
}

#[test]
fn drag_from_canvas_points() {
    let mut wheel = Wheel::default();
    let geometry = WheelGeometry::centered(400.0, 400.0, 20.0);
    // A point at 12 o'clock sits on the first slice's start boundary.
    assert!(wheel.begin_drag_at(&geometry, 200.0, 60.0).unwrap());
    assert_eq!(wheel.drag().unwrap().kind, BoundaryKind::Start);
    // Dragging to 3 o'clock would pass the slice's own end at 60°.
    assert!(!wheel.update_drag_at(&geometry, 340.0, 200.0));
    wheel.end_drag();

    // The hub is not grabbable.
    assert!(!wheel.begin_drag_at(&geometry, 200.0, 200.0).unwrap());
}

#[test]
fn placing_items_uses_explicit_angles() {
    let mut wheel = Wheel::from_items(vec![WheelItem::new("only", 1.0, "#000")]).unwrap();
    wheel.begin_drag(0, BoundaryKind::End).unwrap();
    assert!(wheel.update_drag(180.0));
    wheel.end_drag();

    assert_eq!(
        wheel.place_item("overlap", 100.0, 200.0, "#111"),
        Err(WheelError::AngleOverlap {
            start: 100.0,
            end: 200.0
        })
    );
    assert_eq!(wheel.place_item("second", 180.0, 270.0, "#222").unwrap(), 1);
    assert_eq!(wheel.items().len(), 2);
    assert_eq!(wheel.items()[1].weight, 90.0);
    assert_eq!(wheel.layout(), Layout::Manual);
}

#[test]
fn simulated_spin_with_early_stop() {
    let mut wheel = Wheel::default();
    wheel.set_stop_duration_ms(400.0).unwrap();
    let mut source = RngSource::seeded(2718);
    let mut frames = SteppedFrames::new(16.0).unwrap();
    let options = SimulateOptions {
        stop_after_ms: Some(800.0),
        record_rotations: true,
        ..SimulateOptions::default()
    };

    let run = wheel.simulate(&mut source, &mut frames, &options).unwrap();
    let outcome = run.outcome.expect("spin should settle");
    assert!(outcome.stopped_early);
    assert!(outcome.is_consistent());
    // 800 ms spinning plus 400 ms settling at 16 ms per frame.
    assert!(run.frames >= 75 && run.frames <= 77, "frames {}", run.frames);
    assert_eq!(run.rotations.len(), run.frames);
    assert!(run.rotations.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(wheel.phase(), SpinPhase::Settled);
}

#[test]
fn simulation_aborts_at_the_frame_limit() {
    let mut wheel = Wheel::default();
    let mut source = RngSource::seeded(5);
    let mut frames = SteppedFrames::new(10.0).unwrap();
    let options = SimulateOptions {
        max_frames: 20,
        ..SimulateOptions::default()
    };
    let run = wheel.simulate(&mut source, &mut frames, &options).unwrap();
    assert!(run.outcome.is_none());
    assert_eq!(run.frames, 20);
    assert_eq!(wheel.phase(), SpinPhase::Idle);
    assert!(wheel.current_rotation() > 0.0);
}

#[test]
fn renaming_in_manual_layout_keeps_geometry() {
    let mut wheel = Wheel::default();
    wheel.begin_drag(0, BoundaryKind::End).unwrap();
    assert!(wheel.update_drag(50.0));
    wheel.end_drag();
    let before: Vec<(f64, f64)> = wheel
        .segments()
        .iter()
        .map(|s| (s.start_deg(), s.end_deg()))
        .collect();

    let renamed = WheelItem {
        name: "Grand prize".to_string(),
        color: "#000000".into(),
        ..wheel.items()[1].clone()
    };
    wheel.update_item(1, renamed).unwrap();

    assert_eq!(wheel.layout(), Layout::Manual);
    let after: Vec<(f64, f64)> = wheel
        .segments()
        .iter()
        .map(|s| (s.start_deg(), s.end_deg()))
        .collect();
    assert_eq!(before, after);
    assert_eq!(wheel.segments()[1].name(), "Grand prize");
    assert_eq!(wheel.segments()[1].color().as_str(), "#000000");
    assert_eq!(wheel.items()[1].name, "Grand prize");

    // Changing the weight leaves the manual layout.
    wheel.set_weight(1, 120.0).unwrap();
    assert_eq!(wheel.layout(), Layout::Weighted);
    assert_eq!(wheel.segments()[0].start_deg(), 0.0);
}

#[test]
fn failed_spin_from_settled_keeps_phase() {
    let mut wheel = Wheel::from_items(vec![WheelItem::new("solo", 1.0, "#000")]).unwrap();
    let mut source = RngSource::seeded(9);
    wheel.start_spin(&mut source, 0.0).unwrap();
    match wheel.tick(5000.0) {
        Tick::Settled(outcome) => assert!(outcome.is_consistent()),
        other => panic!("unexpected {other:?}"),
    }
    let rotation = wheel.current_rotation();

    wheel.remove_item(0).unwrap();
    assert!(wheel.segments().is_empty());
    assert_eq!(
        wheel.start_spin(&mut source, 6000.0),
        Err(WheelError::EmptySegmentSet)
    );
    assert_eq!(wheel.phase(), SpinPhase::Settled);
    assert_eq!(wheel.current_rotation(), rotation);
}
