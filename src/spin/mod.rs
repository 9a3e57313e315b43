//! Spin state machine.
//!
//! The engine decides the outcome up front with [`select_index`], computes a
//! rotation that parks the chosen segment's midpoint under the pointer (fixed
//! at 0°, 12 o'clock), then eases toward it as the host calls [`SpinEngine::tick`]
//! with frame timestamps. On settle the landed segment is re-derived from the
//! final rotation and reported next to the pre-selected one.
//!
//! ```text
//! Idle ──start──▶ Spinning ──tick(progress=1)──▶ Settled ──start──▶ Spinning
//!                    │                              ▲
//!                    └──stop_early──▶ Settling ─────┘
//! ```
//!
//! [`SpinEngine::abort`] returns any active phase to `Idle` without an outcome.

mod easing;
mod simulate;

pub use easing::ease_out_cubic;
pub use simulate::{simulate_spin, SimulateOptions, SpinRun};

use crate::random::{uniform_index, RandomSource};
use crate::segment::{resolve_index, Segment};
use crate::select::select_index;
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::util::math::{normalize_deg, pointer_angle_deg, FULL_TURN_DEG};
use crate::util::{WheelError, WheelResult};

/// Timing and turn-count settings for a spin.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinConfig {
    /// Duration of a full spin in milliseconds.
    pub spin_duration_ms: f64,
    /// Duration of the settle after an early stop, in milliseconds.
    pub stop_duration_ms: f64,
    /// Minimum whole turns before landing (inclusive).
    pub min_turns: u32,
    /// Maximum whole turns before landing (exclusive).
    pub max_turns: u32,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            spin_duration_ms: 5000.0,
            stop_duration_ms: 1000.0,
            min_turns: 5,
            max_turns: 10,
        }
    }
}

impl SpinConfig {
    /// Checks durations and the turn range.
    pub fn validate(&self) -> WheelResult<()> {
        if !self.spin_duration_ms.is_finite() || self.spin_duration_ms <= 0.0 {
            return Err(WheelError::InvalidConfig {
                reason: "spin_duration_ms must be finite and > 0",
            });
        }
        if !self.stop_duration_ms.is_finite() || self.stop_duration_ms <= 0.0 {
            return Err(WheelError::InvalidConfig {
                reason: "stop_duration_ms must be finite and > 0",
            });
        }
        if self.min_turns == 0 {
            return Err(WheelError::InvalidConfig {
                reason: "min_turns must be >= 1",
            });
        }
        if self.max_turns <= self.min_turns {
            return Err(WheelError::InvalidConfig {
                reason: "max_turns must be greater than min_turns",
            });
        }
        Ok(())
    }
}

/// Lifecycle phase of the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpinPhase {
    Idle,
    Spinning,
    Settling,
    Settled,
}

impl SpinPhase {
    /// True while the wheel is moving.
    pub fn is_active(self) -> bool {
        matches!(self, SpinPhase::Spinning | SpinPhase::Settling)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpinPhase::Idle => "idle",
            SpinPhase::Spinning => "spinning",
            SpinPhase::Settling => "settling",
            SpinPhase::Settled => "settled",
        }
    }
}

/// Parameters fixed when a spin starts.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinPlan {
    /// Index of the pre-selected segment.
    pub selected_index: usize,
    /// Whole turns added before landing.
    pub turns: u32,
    pub start_rotation_deg: f64,
    pub target_rotation_deg: f64,
}

/// Result of a settled spin.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinOutcome {
    /// Segment chosen before the animation started.
    pub selected_index: usize,
    pub selected: Segment,
    /// Segment under the pointer at the final rotation; `None` when a gap in
    /// manually edited segments sits under the pointer.
    pub landed_index: Option<usize>,
    pub landed: Option<Segment>,
    /// Wheel angle under the pointer, in [0, 360).
    pub pointer_angle_deg: f64,
    pub final_rotation_deg: f64,
    /// Whether the spin was cut short with [`SpinEngine::stop_early`].
    pub stopped_early: bool,
}

impl SpinOutcome {
    /// True when the landed segment matches the pre-selected one.
    pub fn is_consistent(&self) -> bool {
        self.landed_index == Some(self.selected_index)
    }
}

/// What a single [`SpinEngine::tick`] produced.
#[derive(Clone, Debug, PartialEq)]
pub enum Tick {
    /// No spin in flight; the rotation is unchanged.
    Idle { rotation_deg: f64 },
    /// Still animating.
    Running { rotation_deg: f64, progress: f64 },
    /// Reached the target this frame.
    Settled(SpinOutcome),
}

struct Selection {
    index: usize,
    segment: Segment,
}

/// Drives rotation from spin request to settle.
pub struct SpinEngine {
    config: SpinConfig,
    phase: SpinPhase,
    current_rotation: f64,
    start_rotation: f64,
    target_rotation: f64,
    start_time: f64,
    duration: f64,
    selection: Option<Selection>,
    last_outcome: Option<SpinOutcome>,
}

impl Default for SpinEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinEngine {
    /// Creates an idle engine with the default config.
    pub fn new() -> Self {
        Self {
            config: SpinConfig::default(),
            phase: SpinPhase::Idle,
            current_rotation: 0.0,
            start_rotation: 0.0,
            target_rotation: 0.0,
            start_time: 0.0,
            duration: SpinConfig::default().spin_duration_ms,
            selection: None,
            last_outcome: None,
        }
    }

    /// Creates an idle engine with a validated config.
    pub fn with_config(config: SpinConfig) -> WheelResult<Self> {
        config.validate()?;
        let mut engine = Self::new();
        engine.duration = config.spin_duration_ms;
        engine.config = config;
        Ok(engine)
    }

    /// Replaces the config; rejected while a spin is in flight.
    pub fn set_config(&mut self, config: SpinConfig) -> WheelResult<()> {
        if self.phase.is_active() {
            return Err(WheelError::WheelBusy);
        }
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    /// Accumulated rotation in degrees; never reset between spins.
    pub fn current_rotation(&self) -> f64 {
        self.current_rotation
    }

    pub fn start_rotation(&self) -> f64 {
        self.start_rotation
    }

    pub fn target_rotation(&self) -> f64 {
        self.target_rotation
    }

    /// Segment chosen for the spin in flight.
    pub fn selected(&self) -> Option<&Segment> {
        self.selection.as_ref().map(|s| &s.segment)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection.as_ref().map(|s| s.index)
    }

    /// Outcome of the most recent settled spin.
    pub fn last_outcome(&self) -> Option<&SpinOutcome> {
        self.last_outcome.as_ref()
    }

    /// Wheel angle currently under the pointer.
    pub fn pointer_angle(&self) -> f64 {
        pointer_angle_deg(self.current_rotation)
    }

    /// Animation progress in [0, 1] at `now_ms`; 1 when nothing is in flight.
    pub fn progress(&self, now_ms: f64) -> f64 {
        if !self.phase.is_active() {
            return 1.0;
        }
        ((now_ms - self.start_time) / self.duration).clamp(0.0, 1.0)
    }

    /// Starts a spin at `now_ms`, fixing the outcome before any motion.
    ///
    /// Fails with `InvalidSpinRequest` while a spin is in flight and with
    /// `EmptySegmentSet` when there is nothing to land on; in both cases the
    /// phase is left unchanged.
    pub fn start_spin(
        &mut self,
        segments: &[Segment],
        source: &mut dyn RandomSource,
        now_ms: f64,
    ) -> WheelResult<SpinPlan> {
        let _span = trace_span!("start_spin", segments = segments.len()).entered();

        if self.phase.is_active() {
            return Err(WheelError::InvalidSpinRequest {
                phase: self.phase.as_str(),
            });
        }
        let selected_index = select_index(segments, source)?;
        let segment = segments[selected_index].clone();
        let midpoint = segment.midpoint_deg();
        let turns = uniform_index(source, self.config.min_turns, self.config.max_turns);

        // Align to a whole turn so the pointer lands on the midpoint no matter
        // where earlier spins left the wheel.
        let base = self.current_rotation - normalize_deg(self.current_rotation);
        let target = base + f64::from(turns) * FULL_TURN_DEG + (FULL_TURN_DEG - midpoint);

        self.start_rotation = self.current_rotation;
        self.target_rotation = target;
        self.start_time = now_ms;
        self.duration = self.config.spin_duration_ms;
        self.phase = SpinPhase::Spinning;

        trace_event!(
            "spin_started",
            selected = segment.name.as_str(),
            turns = turns,
            target_rotation = target,
        );
        self.selection = Some(Selection {
            index: selected_index,
            segment,
        });

        Ok(SpinPlan {
            selected_index,
            turns,
            start_rotation_deg: self.start_rotation,
            target_rotation_deg: target,
        })
    }

    /// Cuts the spin short: eases over the remaining rotation in the shorter
    /// stop duration, starting from the current rotation so there is no jump.
    pub fn stop_early(&mut self, now_ms: f64) -> WheelResult<()> {
        if self.phase != SpinPhase::Spinning {
            return Err(WheelError::InvalidSpinRequest {
                phase: self.phase.as_str(),
            });
        }
        self.start_rotation = self.current_rotation;
        self.start_time = now_ms;
        self.duration = self.config.stop_duration_ms;
        self.phase = SpinPhase::Settling;
        trace_event!(
            "spin_stop_requested",
            rotation = self.current_rotation,
            remaining = self.target_rotation - self.current_rotation,
        );
        Ok(())
    }

    /// Stops a spin in flight without producing an outcome.
    ///
    /// The rotation stays wherever the last tick left it. Returns false if no
    /// spin was in flight.
    pub fn abort(&mut self) -> bool {
        if !self.phase.is_active() {
            return false;
        }
        self.phase = SpinPhase::Idle;
        self.selection = None;
        self.duration = self.config.spin_duration_ms;
        trace_event!("spin_aborted", rotation = self.current_rotation);
        true
    }

    /// Advances the animation to `now_ms`.
    ///
    /// `segments` must be the set the spin was started with; they are only
    /// read on the settling frame.
    pub fn tick(&mut self, now_ms: f64, segments: &[Segment]) -> Tick {
        if !self.phase.is_active() {
            return Tick::Idle {
                rotation_deg: self.current_rotation,
            };
        }

        let progress = self.progress(now_ms);
        if progress < 1.0 {
            let eased = ease_out_cubic(progress);
            self.current_rotation =
                self.start_rotation + (self.target_rotation - self.start_rotation) * eased;
            return Tick::Running {
                rotation_deg: self.current_rotation,
                progress,
            };
        }

        self.current_rotation = self.target_rotation;
        match self.settle(segments) {
            Some(outcome) => Tick::Settled(outcome),
            None => Tick::Idle {
                rotation_deg: self.current_rotation,
            },
        }
    }

    fn settle(&mut self, segments: &[Segment]) -> Option<SpinOutcome> {
        let stopped_early = self.phase == SpinPhase::Settling;
        self.phase = SpinPhase::Settled;
        self.duration = self.config.spin_duration_ms;
        let selection = self.selection.take()?;

        let pointer = pointer_angle_deg(self.current_rotation);
        let landed_index = resolve_index(pointer, segments);
        match landed_index {
            None => {
                trace_warn!("spin_unresolved", pointer_angle = pointer);
            }
            Some(idx) if idx != selection.index => {
                trace_warn!(
                    "spin_landing_mismatch",
                    selected = selection.index,
                    landed = idx,
                    pointer_angle = pointer,
                );
            }
            Some(_) => {}
        }

        let outcome = SpinOutcome {
            selected_index: selection.index,
            selected: selection.segment,
            landed_index,
            landed: landed_index.map(|idx| segments[idx].clone()),
            pointer_angle_deg: pointer,
            final_rotation_deg: self.current_rotation,
            stopped_early,
        };
        trace_event!(
            "spin_settled",
            selected = outcome.selected.name.as_str(),
            pointer_angle = pointer,
            rotation = self.current_rotation,
        );
        self.last_outcome = Some(outcome.clone());
        Some(outcome)
    }
}
