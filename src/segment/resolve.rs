//! Angle to segment lookup.

use crate::segment::Segment;
use crate::util::math::normalize_deg;
use crate::util::{WheelError, WheelResult};

/// Returns the index of the segment covering `angle_deg`.
///
/// The angle is normalized into [0, 360) first, so negative angles and
/// accumulated rotations are accepted. Segments are half-open `[start, end)`;
/// a segment whose start exceeds its end wraps through 0°. `None` means the
/// segments leave a gap at this angle.
pub fn resolve_index(angle_deg: f64, segments: &[Segment]) -> Option<usize> {
    let angle = normalize_deg(angle_deg);
    segments.iter().position(|segment| segment.contains(angle))
}

/// Returns the segment covering `angle_deg`, if any.
pub fn resolve(angle_deg: f64, segments: &[Segment]) -> Option<&Segment> {
    resolve_index(angle_deg, segments).map(|idx| &segments[idx])
}

/// Like [`resolve_index`], reporting a gap as [`WheelError::UnresolvedAngle`].
pub fn try_resolve_index(angle_deg: f64, segments: &[Segment]) -> WheelResult<usize> {
    resolve_index(angle_deg, segments).ok_or(WheelError::UnresolvedAngle {
        angle: normalize_deg(angle_deg),
    })
}
