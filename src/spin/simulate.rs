//! Frame loop driving one spin to completion.

use crate::clock::FrameSource;
use crate::random::RandomSource;
use crate::segment::Segment;
use crate::spin::{SpinEngine, SpinOutcome, SpinPlan, Tick};
use crate::util::WheelResult;

/// Knobs for [`simulate_spin`].
#[derive(Clone, Debug, PartialEq)]
pub struct SimulateOptions {
    /// Request an early stop this many milliseconds after the spin starts.
    pub stop_after_ms: Option<f64>,
    /// Abort the spin if it has not settled after this many frames.
    pub max_frames: usize,
    /// Keep the rotation of every frame in [`SpinRun::rotations`].
    pub record_rotations: bool,
}

impl Default for SimulateOptions {
    fn default() -> Self {
        Self {
            stop_after_ms: None,
            max_frames: 100_000,
            record_rotations: false,
        }
    }
}

/// Trace of a simulated spin.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinRun {
    pub plan: SpinPlan,
    /// `None` if the frame limit aborted the spin.
    pub outcome: Option<SpinOutcome>,
    /// Number of ticks issued.
    pub frames: usize,
    pub rotations: Vec<f64>,
}

/// Starts a spin and ticks it frame by frame until it settles.
pub fn simulate_spin<F: FrameSource>(
    engine: &mut SpinEngine,
    segments: &[Segment],
    source: &mut dyn RandomSource,
    frames: &mut F,
    options: &SimulateOptions,
) -> WheelResult<SpinRun> {
    let started_at = frames.now_ms();
    let plan = engine.start_spin(segments, source, started_at)?;
    let mut rotations = Vec::new();
    let mut stop_pending = options.stop_after_ms;
    let mut ticks = 0usize;

    while ticks < options.max_frames {
        frames.wait_frame();
        ticks += 1;
        let now = frames.now_ms();
        if let Some(delay) = stop_pending {
            // A stop that arrives after the spin would have finished is moot.
            if now - started_at >= delay && engine.progress(now) < 1.0 {
                stop_pending = None;
                engine.stop_early(now)?;
            }
        }
        match engine.tick(now, segments) {
            Tick::Running { rotation_deg, .. } => {
                if options.record_rotations {
                    rotations.push(rotation_deg);
                }
            }
            Tick::Settled(outcome) => {
                if options.record_rotations {
                    rotations.push(outcome.final_rotation_deg);
                }
                return Ok(SpinRun {
                    plan,
                    outcome: Some(outcome),
                    frames: ticks,
                    rotations,
                });
            }
            Tick::Idle { .. } => break,
        }
    }

    engine.abort();
    Ok(SpinRun {
        plan,
        outcome: None,
        frames: ticks,
        rotations,
    })
}
