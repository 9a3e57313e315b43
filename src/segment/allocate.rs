//! Weight-proportional segment allocation.

use crate::segment::{Segment, WheelItem};
use crate::trace::{trace_event, trace_span};
use crate::util::math::FULL_TURN_DEG;
use crate::util::{WheelError, WheelResult};

/// Splits the circle into one contiguous segment per item, in item order.
///
/// Each segment spans `weight / total * 360` degrees. The last segment's end is
/// pinned to exactly 360 so accumulated rounding never leaves a sliver
/// uncovered. An empty item list yields no segments.
pub fn allocate(items: &[WheelItem]) -> WheelResult<Vec<Segment>> {
    let _span = trace_span!("allocate", items = items.len()).entered();

    for (index, item) in items.iter().enumerate() {
        if !item.weight.is_finite() || item.weight <= 0.0 {
            return Err(WheelError::InvalidWeight {
                index,
                weight: item.weight,
            });
        }
    }
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let total: f64 = items.iter().map(|item| item.weight).sum();
    let mut cumulative = 0.0f64;
    let mut segments = Vec::with_capacity(items.len());
    for item in items {
        let share = item.weight / total;
        let start_deg = cumulative;
        let end_deg = (cumulative + share * FULL_TURN_DEG).min(FULL_TURN_DEG);
        segments.push(Segment {
            name: item.name.clone(),
            weight: item.weight,
            color: item.color.clone(),
            start_deg,
            end_deg,
            probability: share * 100.0,
        });
        cumulative = end_deg;
    }
    if let Some(last) = segments.last_mut() {
        last.end_deg = FULL_TURN_DEG;
    }

    trace_event!("segments_allocated", count = segments.len(), total_weight = total);
    Ok(segments)
}
