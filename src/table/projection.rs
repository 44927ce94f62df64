use std::cmp::Ordering;

use crate::types::Entry;

/// Orders entries by payload instead of key.
///
/// Plain lexicographic string order; a `None` payload sorts before every
/// present payload. Only used to build a transient sorted view for
/// payload search, never to reorder a table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionComparator;

impl ProjectionComparator {
    /// Compare two entries by payload.
    pub fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        self.compare_payloads(a.payload(), b.payload())
    }

    /// Compare raw payloads with the same null placement as [`compare`](Self::compare).
    pub fn compare_payloads(&self, a: Option<&str>, b: Option<&str>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => a.cmp(b),
        }
    }

    /// Sort `entries` by payload, then binary-search for `target`.
    ///
    /// The view must be fully sorted before the search, so this always sorts
    /// first. With several entries sharing `target`, the returned one is
    /// whichever the search probes first: callers must accept any of them.
    pub fn search<'a>(
        &self,
        mut entries: Vec<&'a Entry>,
        target: Option<&str>,
    ) -> Option<&'a Entry> {
        entries.sort_by(|a, b| self.compare(a, b));
        entries
            .binary_search_by(|probe| self.compare_payloads(probe.payload(), target))
            .ok()
            .map(|position| entries[position])
    }
}
