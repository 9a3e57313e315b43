//! Weighted outcome selection, independent of segment geometry.

use crate::random::RandomSource;
use crate::segment::Segment;
use crate::util::{WheelError, WheelResult};

/// Picks a segment index with chance proportional to its probability.
///
/// Draws `r` from `[0, Σprobability)` and returns the first segment whose
/// cumulative probability reaches `r`; segments with no probability are never
/// picked this way. If rounding leaves `r` above every cumulative sum the last
/// segment is returned.
pub fn select_index(segments: &[Segment], source: &mut dyn RandomSource) -> WheelResult<usize> {
    let last = segments.len().checked_sub(1).ok_or(WheelError::EmptySegmentSet)?;
    let total: f64 = segments.iter().map(|segment| segment.probability).sum();
    let r = source.next_unit() * total;

    let mut cumulative = 0.0f64;
    for (idx, segment) in segments.iter().enumerate() {
        cumulative += segment.probability;
        if segment.probability > 0.0 && cumulative >= r {
            return Ok(idx);
        }
    }
    Ok(last)
}

/// Picks a segment with chance proportional to its probability.
pub fn select<'a>(
    segments: &'a [Segment],
    source: &mut dyn RandomSource,
) -> WheelResult<&'a Segment> {
    select_index(segments, source).map(|idx| &segments[idx])
}
