use std::collections::BTreeSet;

use crate::reconstruct::Timeline;

/// Select the timeline rows surrounding the given violation times.
///
/// For every violation time that matches a timeline timestamp exactly,
/// the clipped range `[idx - radius, idx + radius]` is kept; overlapping
/// windows merge and each row appears once, in ascending order. Times
/// with no exact match contribute nothing. An empty violation list keeps
/// the full timeline.
pub fn select_rows(timeline: &Timeline, violation_times_ps: &[f64], radius: usize) -> Vec<usize> {
    if violation_times_ps.is_empty() {
        return (0..timeline.len()).collect();
    }

    let mut keep: BTreeSet<usize> = BTreeSet::new();
    for &t in violation_times_ps {
        if !t.is_finite() || t < 0.0 || t.fract() != 0.0 {
            continue;
        }
        let Some(idx) = timeline.row_index(t as u64) else {
            continue;
        };
        let start = idx.saturating_sub(radius);
        let end = (idx + radius).min(timeline.len() - 1);
        keep.extend(start..=end);
    }
    keep.into_iter().collect()
}
