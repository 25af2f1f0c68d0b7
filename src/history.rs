//! Bounded, newest-first history of extraction results

use std::collections::VecDeque;

use crate::extract::ExtractionResult;

/// Number of results kept before the oldest is evicted
pub(crate) const HISTORY_CAPACITY: usize = 10;

/// Newest-first store of past extractions, discarded at exit.
///
/// Position 0 is always the most recent surviving push. Entries are never
/// reordered or deduplicated.
#[derive(Debug, Default)]
pub(crate) struct HistoryBuffer {
    entries: VecDeque<ExtractionResult>,
}

impl HistoryBuffer {
    pub(crate) fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
        }
    }

    /// Insert at the front, evicting the oldest entry past capacity.
    pub(crate) fn push(&mut self, result: ExtractionResult) {
        self.entries.push_front(result);
        if self.entries.len() > HISTORY_CAPACITY {
            self.entries.pop_back();
        }
    }

    pub(crate) fn at(&self, display_index: usize) -> Option<&ExtractionResult> {
        self.entries.get(display_index)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from newest to oldest
    pub(crate) fn iter(&self) -> impl Iterator<Item = &ExtractionResult> {
        self.entries.iter()
    }
}
