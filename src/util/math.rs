//! Angle helpers shared by the resolver, spin engine and hit testing.

/// Degrees in a full turn.
pub(crate) const FULL_TURN_DEG: f64 = 360.0;

/// Wraps an angle in degrees to the range [0, 360).
///
/// Angles already in range come back bit-for-bit unchanged, so segment
/// boundaries resolve exactly.
pub(crate) fn normalize_deg(angle_deg: f64) -> f64 {
    let r = angle_deg % FULL_TURN_DEG;
    if r >= 0.0 {
        return r;
    }
    let wrapped = r + FULL_TURN_DEG;
    if wrapped >= FULL_TURN_DEG {
        0.0
    } else {
        wrapped
    }
}

/// Angle on the wheel under a pointer fixed at 0° when the wheel is rotated
/// clockwise by `rotation_deg`.
pub(crate) fn pointer_angle_deg(rotation_deg: f64) -> f64 {
    normalize_deg(FULL_TURN_DEG - normalize_deg(rotation_deg))
}

/// Shortest unsigned distance between two angles, in [0, 180].
pub(crate) fn circular_distance_deg(a: f64, b: f64) -> f64 {
    let delta = normalize_deg(a - b);
    delta.min(FULL_TURN_DEG - delta)
}

/// Midpoint of the arc running clockwise from `start_deg` to `end_deg`.
///
/// Handles arcs that wrap past 360°.
pub(crate) fn arc_midpoint_deg(start_deg: f64, end_deg: f64) -> f64 {
    if start_deg <= end_deg {
        return (start_deg + end_deg) / 2.0;
    }
    let span = end_deg + FULL_TURN_DEG - start_deg;
    normalize_deg(start_deg + span / 2.0)
}
