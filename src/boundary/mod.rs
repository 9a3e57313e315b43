//! Manual boundary editing.
//!
//! A drag moves one boundary of one segment at a time. Proposed angles are
//! snapped to whole degrees and applied only when the segment stays non-empty
//! and does not cross its neighbours; anything else is ignored so a gesture
//! never fails halfway through.
//!
//! Once a boundary moves, geometry becomes the source of truth: every
//! segment's weight is reset to its span in degrees and its probability to the
//! share of the circle it covers. Re-allocating from those weights reproduces
//! the edited layout when it has no gaps.

mod hit;

pub use hit::{boundary_near_angle, WheelGeometry, BOUNDARY_TOLERANCE_DEG};

use crate::segment::{Color, Segment};
use crate::trace::trace_event;
use crate::util::math::FULL_TURN_DEG;
use crate::util::{WheelError, WheelResult};

/// Which edge of a segment is being moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryKind {
    Start,
    End,
}

/// Transient state of an active drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragState {
    /// Index of the dragged segment; follows it across re-sorts.
    pub item_index: usize,
    pub kind: BoundaryKind,
}

/// Tracks at most one boundary drag.
#[derive(Clone, Debug, Default)]
pub struct BoundaryEditor {
    drag: Option<DragState>,
}

impl BoundaryEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Starts dragging one boundary of `segments[item_index]`.
    pub fn begin_drag(
        &mut self,
        item_index: usize,
        kind: BoundaryKind,
        segments: &[Segment],
    ) -> WheelResult<()> {
        if item_index >= segments.len() {
            return Err(WheelError::InvalidDragTarget {
                index: item_index,
                len: segments.len(),
            });
        }
        self.drag = Some(DragState { item_index, kind });
        Ok(())
    }

    /// Moves the dragged boundary toward `proposed_deg`.
    ///
    /// Returns whether the boundary moved. Out-of-order proposals, or calls
    /// without an active drag, leave `segments` untouched.
    pub fn update_drag(&mut self, proposed_deg: f64, segments: &mut [Segment]) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        if !proposed_deg.is_finite() || drag.item_index >= segments.len() {
            return false;
        }
        let angle = proposed_deg.round();
        let idx = drag.item_index;

        let accepted = match drag.kind {
            BoundaryKind::Start => {
                let floor = match idx.checked_sub(1) {
                    Some(prev) => segments[prev].end_deg.max(0.0),
                    None => 0.0,
                };
                angle < segments[idx].end_deg && angle >= floor
            }
            BoundaryKind::End => {
                let ceiling = match segments.get(idx + 1) {
                    Some(next) => next.start_deg.min(FULL_TURN_DEG),
                    None => FULL_TURN_DEG,
                };
                angle > segments[idx].start_deg && angle <= ceiling
            }
        };
        if !accepted {
            return false;
        }

        match drag.kind {
            BoundaryKind::Start => segments[idx].start_deg = angle,
            BoundaryKind::End => segments[idx].end_deg = angle,
        }
        let new_index = sort_by_start(segments, idx);
        apply_geometry_weights(segments);
        self.drag = Some(DragState {
            item_index: new_index,
            kind: drag.kind,
        });

        trace_event!(
            "boundary_moved",
            item = new_index,
            angle = angle,
            start = segments[new_index].start_deg,
            end = segments[new_index].end_deg,
        );
        true
    }

    /// Finishes the drag, returning what was being dragged.
    pub fn end_drag(&mut self) -> Option<DragState> {
        self.drag.take()
    }
}

/// Inserts a segment with explicit angles, keeping the set sorted.
///
/// Angles are snapped to whole degrees. The span must satisfy
/// `0 <= start < end <= 360` and must not intersect any existing segment.
/// Returns the index of the new segment.
pub fn place_span(
    segments: &mut Vec<Segment>,
    name: impl Into<String>,
    start_deg: f64,
    end_deg: f64,
    color: impl Into<Color>,
) -> WheelResult<usize> {
    let start = start_deg.round();
    let end = end_deg.round();
    if !start.is_finite() || !end.is_finite() || start < 0.0 || end > FULL_TURN_DEG || start >= end
    {
        return Err(WheelError::InvalidAngleRange {
            start: start_deg,
            end: end_deg,
        });
    }
    if segments.iter().any(|s| spans_overlap(start, end, s)) {
        return Err(WheelError::AngleOverlap { start, end });
    }

    segments.push(Segment::from_span(name, start, end, color)?);
    let last = segments.len() - 1;
    let idx = sort_by_start(segments, last);
    apply_geometry_weights(segments);
    Ok(idx)
}

/// Resets each segment's weight to its span and its probability to the share
/// of the circle it covers.
pub fn apply_geometry_weights(segments: &mut [Segment]) {
    for segment in segments.iter_mut() {
        let span = segment.span_deg();
        segment.weight = span;
        segment.probability = span / FULL_TURN_DEG * 100.0;
    }
}

fn spans_overlap(start: f64, end: f64, segment: &Segment) -> bool {
    if segment.wraps() {
        // Split into [start, 360) and [0, end).
        (start < FULL_TURN_DEG && end > segment.start_deg) || (start < segment.end_deg && end > 0.0)
    } else {
        start < segment.end_deg && end > segment.start_deg
    }
}

/// Stable sort by start angle; returns where `tracked` ended up.
fn sort_by_start(segments: &mut [Segment], tracked: usize) -> usize {
    let mut order: Vec<usize> = (0..segments.len()).collect();
    order.sort_by(|&a, &b| segments[a].start_deg.total_cmp(&segments[b].start_deg));
    let sorted: Vec<Segment> = order.iter().map(|&i| segments[i].clone()).collect();
    for (slot, segment) in segments.iter_mut().zip(sorted) {
        *slot = segment;
    }
    order.iter().position(|&i| i == tracked).unwrap_or(tracked)
}
