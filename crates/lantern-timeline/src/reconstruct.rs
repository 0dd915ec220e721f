use std::collections::{BTreeSet, HashMap};

use lantern_trace::{SignalValue, VcdTrace};

/// A dense signal-state table over the union of all change timestamps.
///
/// `rows[i][j]` is the value signal `j` held at `timestamps[i]` under
/// last-value-hold semantics: the value of the latest recorded event at or
/// before that timestamp, or `None` before the signal's first event.
///
/// Rebuilt in full from the trace on every invocation; never cached.
#[derive(Debug, Clone)]
pub struct Timeline {
    /// Ascending, deduplicated union of all event times (picoseconds).
    pub timestamps: Vec<u64>,
    /// Column identifiers, in the trace's declaration order.
    pub signals: Vec<String>,
    /// One row of per-signal held values per timestamp.
    pub rows: Vec<Vec<Option<SignalValue>>>,
    index: HashMap<u64, usize>,
}

impl Timeline {
    /// Reconstruct the dense table from a sparse trace.
    ///
    /// Each signal keeps a cursor into its own event list, advanced
    /// monotonically as timestamps are visited, so reconstruction is
    /// linear in events rather than quadratic. When several events for
    /// one signal share a timestamp the last-listed one wins; this
    /// mirrors the trace's file order and is a format-dependent
    /// assumption, not a guarantee of VCD semantics.
    pub fn reconstruct(trace: &VcdTrace) -> Self {
        let union: BTreeSet<u64> = trace
            .events
            .iter()
            .flat_map(|evs| evs.iter().map(|(t, _)| *t))
            .collect();
        let timestamps: Vec<u64> = union.into_iter().collect();

        let n = trace.signals.len();
        let mut cursors = vec![0usize; n];
        let mut held: Vec<Option<SignalValue>> = vec![None; n];
        let mut rows = Vec::with_capacity(timestamps.len());

        for &t in &timestamps {
            for (j, events) in trace.events.iter().enumerate() {
                while cursors[j] < events.len() && events[cursors[j]].0 <= t {
                    held[j] = Some(events[cursors[j]].1.clone());
                    cursors[j] += 1;
                }
            }
            rows.push(held.clone());
        }

        let index = timestamps.iter().enumerate().map(|(i, &t)| (t, i)).collect();

        Self {
            timestamps,
            signals: trace.signals.clone(),
            rows,
            index,
        }
    }

    /// Row index holding the state at exactly timestamp `t`, if present.
    pub fn row_index(&self, t: u64) -> Option<usize> {
        self.index.get(&t).copied()
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}
