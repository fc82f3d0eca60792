//! Chronological ordering of timeline entries.

use tracing::debug;

use crate::TimelineEntry;

/// Returns the entries sorted by `(year, month)` ascending.
///
/// The sort is stable, so entries sharing a key (typically those without a
/// month) keep their input order. The input is left untouched.
pub fn order(entries: &[TimelineEntry]) -> Vec<TimelineEntry> {
    let mut ordered = entries.to_vec();
    ordered.sort_by_key(|entry| entry.date.sort_key());
    ordered
}

/// Ordered view over an input that is re-sorted only when the input changes.
#[derive(Debug, Default)]
pub struct OrderedView {
    source: Option<Vec<TimelineEntry>>,
    ordered: Vec<TimelineEntry>,
    generation: u64,
}

impl OrderedView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered entries for `entries`, reusing the previous result when the
    /// content is unchanged.
    pub fn get(&mut self, entries: &[TimelineEntry]) -> &[TimelineEntry] {
        let stale = self
            .source
            .as_deref()
            .map_or(true, |source| source != entries);
        if stale {
            self.ordered = order(entries);
            self.source = Some(entries.to_vec());
            self.generation += 1;
            debug!(
                entries = entries.len(),
                generation = self.generation,
                "timeline re-ordered"
            );
        }
        &self.ordered
    }

    /// Result of the last `get`.
    pub fn current(&self) -> &[TimelineEntry] {
        &self.ordered
    }

    /// Number of times the view has been recomputed.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
