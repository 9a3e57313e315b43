use clap::Parser;
use serde::{Deserialize, Serialize};
use spinwheel::{
    FrameSource, RandomSource, RealtimeFrames, RngSource, Segment, SimulateOptions, SpinConfig,
    SpinOutcome, SteppedFrames, Wheel, WheelItem,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Spinwheel CLI (JSON wheel file driven)")]
struct Cli {
    /// Path to the JSON wheel file; the default prize list is used if it is missing.
    #[arg(short, long, value_name = "FILE", default_value = "wheel.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example wheel file and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
    /// Number of spins, overriding `run.spins`.
    #[arg(short = 'n', long)]
    spins: Option<usize>,
    /// RNG seed, overriding `run.seed`.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ItemJson {
    name: String,
    weight: f64,
    color: String,
}

impl Default for ItemJson {
    fn default() -> Self {
        Self {
            name: String::new(),
            weight: 1.0,
            color: "#CCCCCC".to_string(),
        }
    }
}

impl From<ItemJson> for WheelItem {
    fn from(value: ItemJson) -> Self {
        WheelItem::new(value.name, value.weight, value.color)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct SettingsJson {
    spin_duration_ms: f64,
    stop_animation_time_ms: f64,
    min_turns: u32,
    max_turns: u32,
}

impl Default for SettingsJson {
    fn default() -> Self {
        let cfg = SpinConfig::default();
        Self {
            spin_duration_ms: cfg.spin_duration_ms,
            stop_animation_time_ms: cfg.stop_duration_ms,
            min_turns: cfg.min_turns,
            max_turns: cfg.max_turns,
        }
    }
}

impl From<SettingsJson> for SpinConfig {
    fn from(value: SettingsJson) -> Self {
        SpinConfig {
            spin_duration_ms: value.spin_duration_ms,
            stop_duration_ms: value.stop_animation_time_ms,
            min_turns: value.min_turns,
            max_turns: value.max_turns,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RunJson {
    spins: usize,
    seed: Option<u64>,
    stop_after_ms: Option<f64>,
    frame_ms: f64,
    realtime: bool,
    max_frames: usize,
}

impl Default for RunJson {
    fn default() -> Self {
        Self {
            spins: 1,
            seed: None,
            stop_after_ms: None,
            frame_ms: 1000.0 / 60.0,
            realtime: false,
            max_frames: SimulateOptions::default().max_frames,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    /// `None` when the file has no `items` key; the defaults apply then.
    items: Option<Vec<ItemJson>>,
    settings: SettingsJson,
    run: RunJson,
    output_path: Option<String>,
}

#[derive(Debug, Serialize)]
struct SegmentRecord {
    name: String,
    color: String,
    start_deg: f64,
    end_deg: f64,
    probability: f64,
}

impl From<&Segment> for SegmentRecord {
    fn from(value: &Segment) -> Self {
        Self {
            name: value.name().to_string(),
            color: value.color().as_str().to_string(),
            start_deg: value.start_deg(),
            end_deg: value.end_deg(),
            probability: value.probability(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SpinRecord {
    selected: String,
    landed: Option<String>,
    pointer_angle: f64,
    final_rotation: f64,
    stopped_early: bool,
    frames: usize,
}

impl SpinRecord {
    fn new(outcome: &SpinOutcome, frames: usize) -> Self {
        Self {
            selected: outcome.selected.name().to_string(),
            landed: outcome.landed.as_ref().map(|s| s.name().to_string()),
            pointer_angle: outcome.pointer_angle_deg,
            final_rotation: outcome.final_rotation_deg,
            stopped_early: outcome.stopped_early,
            frames,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    segments: Vec<SegmentRecord>,
    spins: Vec<SpinRecord>,
}

fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "wheel file not found, using defaults");
        return Ok(Config::default());
    }
    let config_text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&config_text)?)
}

fn run_spins<F: FrameSource>(
    wheel: &mut Wheel,
    source: &mut dyn RandomSource,
    frames: &mut F,
    spins: usize,
    options: &SimulateOptions,
) -> Result<Vec<SpinRecord>, Box<dyn std::error::Error>> {
    let mut records = Vec::with_capacity(spins);
    for spin in 0..spins {
        let run = wheel.simulate(source, frames, options)?;
        let Some(outcome) = run.outcome else {
            return Err(format!("spin {spin} did not settle within {} frames", run.frames).into());
        };
        tracing::info!(
            spin,
            selected = outcome.selected.name(),
            frames = run.frames,
            "spin settled"
        );
        records.push(SpinRecord::new(&outcome, run.frames));
    }
    Ok(records)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("spinwheel=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config = load_config(&cli.config)?;
    let spins = cli.spins.unwrap_or(config.run.spins);
    if spins == 0 {
        return Err("spins must be at least 1".into());
    }

    let items = config
        .items
        .map(|items| items.into_iter().map(WheelItem::from).collect());
    let mut wheel = Wheel::from_stored(items)?.with_config(config.settings.into())?;

    let mut source = match cli.seed.or(config.run.seed) {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_os(),
    };
    let options = SimulateOptions {
        stop_after_ms: config.run.stop_after_ms,
        max_frames: config.run.max_frames,
        record_rotations: false,
    };

    let records = if config.run.realtime {
        let mut frames = RealtimeFrames::new(config.run.frame_ms)?;
        run_spins(&mut wheel, &mut source, &mut frames, spins, &options)?
    } else {
        let mut frames = SteppedFrames::new(config.run.frame_ms)?;
        run_spins(&mut wheel, &mut source, &mut frames, spins, &options)?
    };

    let output = Output {
        segments: wheel.segments().iter().map(SegmentRecord::from).collect(),
        spins: records,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
