//! Monotonic time sources in milliseconds.

use std::cell::Cell;
use std::time::{Duration, Instant};

use crate::util::{WheelError, WheelResult};

/// Monotonic clock reporting milliseconds since an arbitrary origin.
pub trait Clock {
    /// Current time in milliseconds.
    fn now_ms(&self) -> f64;
}

/// Wall clock backed by [`Instant`], with its origin at construction.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock for deterministic animation.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    /// Creates a clock reading `start_ms`.
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Moves the clock forward; negative steps are ignored.
    pub fn advance(&self, delta_ms: f64) {
        if delta_ms > 0.0 {
            self.now.set(self.now.get() + delta_ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Clock that can also wait for the next animation frame.
pub trait FrameSource: Clock {
    /// Blocks (or advances) until the next frame is due.
    fn wait_frame(&mut self);
}

/// Synthetic frames: every frame advances a [`ManualClock`] by a fixed step.
#[derive(Clone, Debug)]
pub struct SteppedFrames {
    clock: ManualClock,
    frame_ms: f64,
}

impl SteppedFrames {
    /// Creates frames of `frame_ms` starting at time zero.
    pub fn new(frame_ms: f64) -> WheelResult<Self> {
        validate_frame_ms(frame_ms)?;
        Ok(Self {
            clock: ManualClock::new(0.0),
            frame_ms,
        })
    }
}

impl Clock for SteppedFrames {
    fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }
}

impl FrameSource for SteppedFrames {
    fn wait_frame(&mut self) {
        self.clock.advance(self.frame_ms);
    }
}

/// Wall-clock frames paced by sleeping the current thread.
#[derive(Clone, Debug)]
pub struct RealtimeFrames {
    clock: MonotonicClock,
    frame: Duration,
}

impl RealtimeFrames {
    pub fn new(frame_ms: f64) -> WheelResult<Self> {
        validate_frame_ms(frame_ms)?;
        Ok(Self {
            clock: MonotonicClock::new(),
            frame: Duration::from_secs_f64(frame_ms / 1000.0),
        })
    }
}

impl Clock for RealtimeFrames {
    fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }
}

impl FrameSource for RealtimeFrames {
    fn wait_frame(&mut self) {
        std::thread::sleep(self.frame);
    }
}

fn validate_frame_ms(frame_ms: f64) -> WheelResult<()> {
    if !frame_ms.is_finite() || frame_ms <= 0.0 {
        return Err(WheelError::InvalidConfig {
            reason: "frame_ms must be finite and > 0",
        });
    }
    Ok(())
}
