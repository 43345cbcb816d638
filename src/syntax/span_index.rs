//! Accepted-span bookkeeping for a highlighting pass
//!
//! Spans are keyed by start offset and never overlap each other, so their end
//! offsets are ordered too and an overlap query only has to walk backwards
//! from the query end until it falls off the query start.

use std::collections::BTreeMap;

use super::style::Span;

/// The set of already-colored ranges
#[derive(Debug, Clone, Default)]
pub struct SpanIndex {
    spans: BTreeMap<usize, Span>,
}

impl SpanIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Spans sharing at least one byte with `[start, end)`, latest first
    pub fn overlapping(&self, start: usize, end: usize) -> impl Iterator<Item = &Span> {
        self.spans
            .range(..end)
            .rev()
            .map(|(_, span)| span)
            .take_while(move |span| span.end > start)
    }

    /// Whether a candidate of `priority` may color `[start, end)`
    ///
    /// Every span it overlaps must have strictly lower priority. A single
    /// equal-or-higher span blocks the whole candidate; ranges are never
    /// split or trimmed.
    pub fn can_apply(&self, start: usize, end: usize, priority: i32) -> bool {
        self.overlapping(start, end).all(|span| span.priority < priority)
    }

    /// Accept `span` if [`can_apply`](Self::can_apply) allows it
    ///
    /// Lower-priority spans it overlaps are evicted and returned. `None`
    /// means the candidate was rejected and the index is unchanged.
    pub fn try_insert(&mut self, span: Span) -> Option<Vec<Span>> {
        if span.is_empty() || !self.can_apply(span.start, span.end, span.priority) {
            return None;
        }
        let evicted = self.remove_overlapping(span.start, span.end);
        self.spans.insert(span.start, span);
        Some(evicted)
    }

    /// Drop every span overlapping `[start, end)` and return them in order
    pub fn remove_overlapping(&mut self, start: usize, end: usize) -> Vec<Span> {
        let keys: Vec<usize> = self.overlapping(start, end).map(|s| s.start).collect();
        keys.into_iter()
            .rev()
            .filter_map(|key| self.spans.remove(&key))
            .collect()
    }

    /// All spans in start order
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.spans.values()
    }

    /// Spans fully inside `[start, end)` in start order
    pub fn spans_within(&self, start: usize, end: usize) -> impl Iterator<Item = &Span> {
        self.spans
            .range(start..end)
            .map(|(_, span)| span)
            .filter(move |span| span.end <= end)
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn clear(&mut self) {
        self.spans.clear();
    }

    /// Consume the index, yielding spans in start order
    pub fn into_spans(self) -> Vec<Span> {
        self.spans.into_values().collect()
    }
}

impl FromIterator<Span> for SpanIndex {
    /// Build an index, keeping the first of any overlapping spans
    fn from_iter<I: IntoIterator<Item = Span>>(iter: I) -> Self {
        let mut index = SpanIndex::new();
        for span in iter {
            if index.overlapping(span.start, span.end).next().is_none() && !span.is_empty() {
                index.spans.insert(span.start, span);
            }
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::style::Argb;

    fn span(start: usize, end: usize, priority: i32) -> Span {
        Span::new(start, end, Argb::WHITE, priority)
    }

    #[test]
    fn test_accepts_disjoint() {
        let mut index = SpanIndex::new();
        assert!(index.try_insert(span(0, 5, 10)).is_some());
        assert!(index.try_insert(span(5, 8, 10)).is_some());
        assert!(index.try_insert(span(10, 12, 1)).is_some());
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_equal_priority_blocks() {
        let mut index = SpanIndex::new();
        index.try_insert(span(0, 5, 10));
        assert!(!index.can_apply(4, 6, 10));
        assert!(index.try_insert(span(4, 6, 10)).is_none());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_higher_priority_evicts_lower() {
        let mut index = SpanIndex::new();
        index.try_insert(span(0, 3, 5));
        index.try_insert(span(4, 6, 5));
        index.try_insert(span(8, 9, 5));

        let evicted = index.try_insert(span(2, 7, 20)).unwrap();
        assert_eq!(evicted, vec![span(0, 3, 5), span(4, 6, 5)]);
        let left: Vec<_> = index.spans().copied().collect();
        assert_eq!(left, vec![span(2, 7, 20), span(8, 9, 5)]);
    }

    #[test]
    fn test_one_blocker_rejects_whole_candidate() {
        let mut index = SpanIndex::new();
        index.try_insert(span(0, 2, 1));
        index.try_insert(span(6, 8, 50));
        assert!(index.try_insert(span(1, 7, 20)).is_none());
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_overlap_query_bounds() {
        let mut index = SpanIndex::new();
        index.try_insert(span(0, 5, 1));
        index.try_insert(span(5, 10, 1));
        index.try_insert(span(12, 15, 1));

        let hits: Vec<_> = index.overlapping(4, 13).map(|s| s.start).collect();
        assert_eq!(hits, vec![12, 5, 0]);
        assert_eq!(index.overlapping(10, 12).count(), 0);
    }

    #[test]
    fn test_remove_overlapping() {
        let mut index = SpanIndex::new();
        index.try_insert(span(0, 5, 1));
        index.try_insert(span(6, 9, 1));
        index.try_insert(span(20, 25, 1));

        let removed = index.remove_overlapping(3, 7);
        assert_eq!(removed, vec![span(0, 5, 1), span(6, 9, 1)]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_collect_skips_overlaps() {
        let index: SpanIndex = vec![span(0, 4, 1), span(2, 6, 50), span(6, 8, 1)]
            .into_iter()
            .collect();
        let kept: Vec<_> = index.spans().map(|s| (s.start, s.end)).collect();
        assert_eq!(kept, vec![(0, 4), (6, 8)]);
    }

    #[test]
    fn test_empty_span_rejected() {
        let mut index = SpanIndex::new();
        assert!(index.try_insert(span(3, 3, 1)).is_none());
        assert!(index.is_empty());
    }
}
