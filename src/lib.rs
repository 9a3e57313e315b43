//! Spinwheel is the core of a prize wheel: weighted items become angular
//! segments, a spin picks its outcome up front and eases the wheel onto it,
//! and the landing is re-derived from the final rotation.
//!
//! Rendering, input wiring and persistence stay with the host. The host feeds
//! frame timestamps to [`Wheel::tick`] and reads back segments and rotation;
//! randomness and time are injected through [`RandomSource`] and [`Clock`].
//! Enable the `tracing` feature to get spans and events for spins and edits.

pub mod boundary;
pub mod clock;
pub mod random;
pub mod segment;
pub mod select;
pub mod spin;
mod trace;
pub mod util;
mod wheel;

pub use boundary::{BoundaryEditor, BoundaryKind, DragState, WheelGeometry};
pub use clock::{Clock, FrameSource, ManualClock, MonotonicClock, RealtimeFrames, SteppedFrames};
pub use random::{RandomSource, RngSource, ScriptedSource};
pub use segment::{allocate, resolve, resolve_index, Color, Segment, WheelItem};
pub use select::{select, select_index};
pub use spin::{
    ease_out_cubic, simulate_spin, SimulateOptions, SpinConfig, SpinEngine, SpinOutcome,
    SpinPhase, SpinPlan, SpinRun, Tick,
};
pub use util::{WheelError, WheelResult};
pub use wheel::{default_items, Layout, Wheel};
