//! Mapping pointer positions on a canvas to wheel angles, segments and
//! boundaries.

use crate::boundary::BoundaryKind;
use crate::segment::{resolve_index, Segment};
use crate::util::math::{circular_distance_deg, normalize_deg};

/// How close (in degrees) a pointer must be to a boundary to grab it.
pub const BOUNDARY_TOLERANCE_DEG: f64 = 5.0;

/// Inner radius of the grabbable ring, as a fraction of the wheel radius.
const HUB_RATIO: f64 = 0.3;

/// Wheel placement on a canvas, in canvas pixels (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl WheelGeometry {
    pub fn new(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self {
            center_x,
            center_y,
            radius,
        }
    }

    /// Centers the wheel on a `width` x `height` canvas, inset by `margin`.
    pub fn centered(width: f64, height: f64, margin: f64) -> Self {
        let center_x = width / 2.0;
        let center_y = height / 2.0;
        let radius = (center_x.min(center_y) - margin).max(0.0);
        Self::new(center_x, center_y, radius)
    }

    /// Screen angle of a point: 0° at 12 o'clock, increasing clockwise.
    pub fn angle_at(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        normalize_deg(dy.atan2(dx).to_degrees() + 90.0)
    }

    /// Wheel angle under a point once the wheel is rotated by `rotation_deg`.
    pub fn wheel_angle_at(&self, x: f64, y: f64, rotation_deg: f64) -> f64 {
        normalize_deg(self.angle_at(x, y) - rotation_deg)
    }

    /// True when the point lies on the slice ring, outside the hub.
    pub fn in_ring(&self, x: f64, y: f64) -> bool {
        let distance = (x - self.center_x).hypot(y - self.center_y);
        distance >= self.radius * HUB_RATIO && distance <= self.radius
    }

    /// Segment under a point, if the point is on the ring and covered.
    pub fn segment_at(
        &self,
        x: f64,
        y: f64,
        rotation_deg: f64,
        segments: &[Segment],
    ) -> Option<usize> {
        if !self.in_ring(x, y) {
            return None;
        }
        resolve_index(self.wheel_angle_at(x, y, rotation_deg), segments)
    }

    /// Boundary within [`BOUNDARY_TOLERANCE_DEG`] of a point on the ring.
    pub fn boundary_at(
        &self,
        x: f64,
        y: f64,
        rotation_deg: f64,
        segments: &[Segment],
    ) -> Option<(usize, BoundaryKind)> {
        if !self.in_ring(x, y) {
            return None;
        }
        boundary_near_angle(
            self.wheel_angle_at(x, y, rotation_deg),
            segments,
            BOUNDARY_TOLERANCE_DEG,
        )
    }
}

/// First boundary within `tolerance_deg` of `angle_deg`, by circular distance.
///
/// Segments are scanned in order and a segment's start is checked before its
/// end, so a shared boundary resolves to the earlier segment's end, and the
/// 0°/360° seam resolves to the first segment's start.
pub fn boundary_near_angle(
    angle_deg: f64,
    segments: &[Segment],
    tolerance_deg: f64,
) -> Option<(usize, BoundaryKind)> {
    for (idx, segment) in segments.iter().enumerate() {
        if circular_distance_deg(angle_deg, segment.start_deg()) <= tolerance_deg {
            return Some((idx, BoundaryKind::Start));
        }
        if circular_distance_deg(angle_deg, segment.end_deg()) <= tolerance_deg {
            return Some((idx, BoundaryKind::End));
        }
    }
    None
}
