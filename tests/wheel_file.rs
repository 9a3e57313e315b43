//! Loads the CLI's bundled example wheel file and runs it through the library.

use serde::Deserialize;
use spinwheel::{
    RngSource, SimulateOptions, SpinConfig, SteppedFrames, Wheel, WheelError, WheelItem,
};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct ItemJson {
    name: String,
    weight: f64,
    color: String,
}

#[derive(Debug, Deserialize)]
struct SettingsJson {
    spin_duration_ms: f64,
    stop_animation_time_ms: f64,
    min_turns: u32,
    max_turns: u32,
}

#[derive(Debug, Deserialize)]
struct RunJson {
    spins: usize,
    seed: Option<u64>,
    stop_after_ms: Option<f64>,
    frame_ms: f64,
}

/// Wheel file structure (partial - only what we need).
#[derive(Debug, Deserialize)]
struct WheelFile {
    items: Vec<ItemJson>,
    settings: SettingsJson,
    run: RunJson,
}

fn example_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("spinwheel-cli")
        .join("config.example.json")
}

fn load_example() -> WheelFile {
    let text = fs::read_to_string(example_path()).expect("Failed to read example wheel file");
    serde_json::from_str(&text).expect("Failed to parse example wheel file")
}

fn build_wheel(file: WheelFile) -> (Wheel, RunJson) {
    let items = file
        .items
        .into_iter()
        .map(|item| WheelItem::new(item.name, item.weight, item.color))
        .collect();
    let config = SpinConfig {
        spin_duration_ms: file.settings.spin_duration_ms,
        stop_duration_ms: file.settings.stop_animation_time_ms,
        min_turns: file.settings.min_turns,
        max_turns: file.settings.max_turns,
    };
    let wheel = Wheel::from_stored(Some(items))
        .and_then(|wheel| wheel.with_config(config))
        .expect("example wheel should be valid");
    (wheel, file.run)
}

#[test]
fn example_wheel_file_builds_a_valid_wheel() {
    let (wheel, _) = build_wheel(load_example());
    assert_eq!(wheel.segments().len(), 6);
    assert_eq!(wheel.segments()[5].end_deg(), 360.0);
    let total: f64 = wheel.segments().iter().map(|s| s.probability()).sum();
    assert!((total - 100.0).abs() < 1e-9);
    // Weights 1, 2, 4, 6, 3, 8 out of 24.
    assert!((wheel.segments()[5].probability() - 8.0 / 24.0 * 100.0).abs() < 1e-9);
}

#[test]
fn example_run_settles_every_spin() {
    let (mut wheel, run) = build_wheel(load_example());
    let mut source = RngSource::seeded(run.seed.unwrap_or(0));
    let mut frames = SteppedFrames::new(run.frame_ms).unwrap();
    let options = SimulateOptions {
        stop_after_ms: run.stop_after_ms,
        ..SimulateOptions::default()
    };

    for _ in 0..run.spins {
        let spin = wheel.simulate(&mut source, &mut frames, &options).unwrap();
        let outcome = spin.outcome.expect("spin should settle");
        assert!(outcome.is_consistent(), "{outcome:?}");
        assert_eq!(outcome.stopped_early, run.stop_after_ms.is_some());
    }
}

#[test]
fn invalid_weights_in_a_wheel_file_are_rejected() {
    let text = r##"{ "items": [ { "name": "a", "weight": 0, "color": "#000" } ],
        "settings": { "spin_duration_ms": 5000, "stop_animation_time_ms": 1000,
                      "min_turns": 5, "max_turns": 10 },
        "run": { "spins": 1, "seed": null, "stop_after_ms": null, "frame_ms": 16 } }"##;
    let file: WheelFile = serde_json::from_str(text).unwrap();
    let items = file
        .items
        .into_iter()
        .map(|item| WheelItem::new(item.name, item.weight, item.color))
        .collect();
    assert!(matches!(
        Wheel::from_stored(Some(items)),
        Err(WheelError::InvalidWeight { index: 0, .. })
    ));
}
