//! Wheel items and the angular segments derived from them.
//!
//! Items (name, weight, color) are the primary data. Segments are derived by
//! [`allocate`] and always cover `[0, 360)` in item order; only manual boundary
//! edits can introduce gaps or wrapping spans. Angles are in degrees, measured
//! clockwise from 12 o'clock.

mod allocate;
mod resolve;

pub use allocate::allocate;
pub use resolve::{resolve, resolve_index, try_resolve_index};

use crate::util::math::{arc_midpoint_deg, normalize_deg, FULL_TURN_DEG};
use crate::util::{WheelError, WheelResult};

/// Opaque display color carried through from items to segments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A named, weighted outcome on the wheel.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelItem {
    /// Label shown on the slice and reported as the spin result.
    pub name: String,
    /// Relative weight; must be finite and > 0.
    pub weight: f64,
    /// Slice color.
    pub color: Color,
}

impl WheelItem {
    pub fn new(name: impl Into<String>, weight: f64, color: impl Into<Color>) -> Self {
        Self {
            name: name.into(),
            weight,
            color: color.into(),
        }
    }
}

/// Angular slice of the wheel for one item.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub(crate) name: String,
    pub(crate) weight: f64,
    pub(crate) color: Color,
    pub(crate) start_deg: f64,
    pub(crate) end_deg: f64,
    pub(crate) probability: f64,
}

impl Segment {
    /// Builds a segment from explicit angles, as when restoring a manually
    /// edited layout.
    ///
    /// Requires `0 <= start < 360`, `0 <= end <= 360` and `start != end`; a
    /// start past the end describes a span wrapping through 0°. Weight is the
    /// span in degrees and probability its share of the circle.
    pub fn from_span(
        name: impl Into<String>,
        start_deg: f64,
        end_deg: f64,
        color: impl Into<Color>,
    ) -> WheelResult<Self> {
        let valid = (0.0..FULL_TURN_DEG).contains(&start_deg)
            && (0.0..=FULL_TURN_DEG).contains(&end_deg)
            && start_deg != end_deg;
        if !valid {
            return Err(WheelError::InvalidAngleRange {
                start: start_deg,
                end: end_deg,
            });
        }
        let mut segment = Self {
            name: name.into(),
            weight: 0.0,
            color: color.into(),
            start_deg,
            end_deg,
            probability: 0.0,
        };
        segment.weight = segment.span_deg();
        segment.probability = segment.weight / FULL_TURN_DEG * 100.0;
        Ok(segment)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    /// Inclusive start angle in degrees.
    pub fn start_deg(&self) -> f64 {
        self.start_deg
    }

    /// Exclusive end angle in degrees.
    pub fn end_deg(&self) -> f64 {
        self.end_deg
    }

    /// Chance of this outcome in percent.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// True when the span runs past 360° back to a smaller end angle.
    pub fn wraps(&self) -> bool {
        self.start_deg > self.end_deg
    }

    /// Angular width in degrees.
    pub fn span_deg(&self) -> f64 {
        if self.wraps() {
            self.end_deg + FULL_TURN_DEG - self.start_deg
        } else {
            self.end_deg - self.start_deg
        }
    }

    /// Center of the span, in [0, 360).
    pub fn midpoint_deg(&self) -> f64 {
        normalize_deg(arc_midpoint_deg(self.start_deg, self.end_deg))
    }

    /// Whether the segment covers `angle_deg` (normalized first).
    pub fn contains(&self, angle_deg: f64) -> bool {
        let angle = normalize_deg(angle_deg);
        if self.wraps() {
            angle >= self.start_deg || angle < self.end_deg
        } else {
            angle >= self.start_deg && angle < self.end_deg
        }
    }

    /// Rebuilds the item this segment was derived from.
    pub fn to_item(&self) -> WheelItem {
        WheelItem {
            name: self.name.clone(),
            weight: self.weight,
            color: self.color.clone(),
        }
    }
}
