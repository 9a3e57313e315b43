//! Error types for spinwheel.

use thiserror::Error;

/// Result alias for spinwheel operations.
pub type Result<T> = std::result::Result<T, WheelError>;

/// Errors that can occur when building, spinning or editing a wheel.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum WheelError {
    /// An item weight was zero, negative or not finite.
    #[error("invalid weight {weight} for item {index}: weights must be finite and > 0")]
    InvalidWeight { index: usize, weight: f64 },
    /// A spin was requested on a wheel without any segments.
    #[error("cannot spin a wheel with no segments")]
    EmptySegmentSet,
    /// No segment covers the given angle (only possible after manual edits).
    #[error("no segment covers angle {angle}")]
    UnresolvedAngle { angle: f64 },
    /// A spin was requested while another spin is still in flight.
    #[error("spin request rejected while {phase}")]
    InvalidSpinRequest { phase: &'static str },
    /// A boundary drag referenced an item that does not exist.
    #[error("drag target {index} out of range for {len} segments")]
    InvalidDragTarget { index: usize, len: usize },
    /// An item edit referenced an item that does not exist.
    #[error("item index {index} out of range for {len} items")]
    ItemOutOfRange { index: usize, len: usize },
    /// A manual span has `start >= end` or lies outside `[0, 360]`.
    #[error("invalid angle range [{start}, {end})")]
    InvalidAngleRange { start: f64, end: f64 },
    /// A manual span intersects an existing segment.
    #[error("angle range [{start}, {end}) overlaps an existing segment")]
    AngleOverlap { start: f64, end: f64 },
    /// The wheel refuses edits while a spin is in flight.
    #[error("wheel is spinning")]
    WheelBusy,
    /// Spin settings are inconsistent.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },
}
