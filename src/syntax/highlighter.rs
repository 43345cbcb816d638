//! Rule-driven highlighting passes
//!
//! A pass walks the rules in descending priority order, runs each matcher
//! over the whole text and offers every match to a [`SpanIndex`]. Because
//! higher priorities go first, a lower-priority rule only ever claims text
//! that nothing more important has claimed.
//!
//! Region passes still match against the full text, so anchors such as `^`
//! keep their absolute meaning; they just ignore matches that do not touch
//! the (line-expanded) region.

use std::time::Instant;

use super::rule_set::RuleSet;
use super::rules::{Rule, RuleId};
use super::span_index::SpanIndex;
use super::style::Span;
use crate::error::{HighlightError, Result};

/// Result of a region pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionHighlight {
    /// Start of the range whose old colors must be cleared
    pub start: usize,
    /// End of the range whose old colors must be cleared
    pub end: usize,
    /// New spans for `[start, end)`, in start order
    pub spans: Vec<Span>,
}

/// Extend `[start, end)` outward to whole lines
///
/// `start` moves back to the beginning of its line, `end` forward to the
/// next `\n` (or the end of the text). Callers must pass a valid range.
pub fn expand_to_lines(text: &str, start: usize, end: usize) -> (usize, usize) {
    let bytes = text.as_bytes();
    let line_start = bytes[..start]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let line_end = bytes[end..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(text.len(), |i| end + i);
    (line_start, line_end)
}

/// Highlight the whole text
///
/// `rules` must be in descending priority order (as a [`RuleSet`] keeps
/// them). The returned spans are in start order and never overlap.
pub fn highlight_all(text: &str, rules: &[Rule]) -> Vec<Span> {
    let started = Instant::now();
    let mut index = SpanIndex::new();

    for rule in rules {
        for (start, end) in rule.find_iter(text) {
            index.try_insert(Span::new(start, end, rule.color(), rule.priority()));
        }
    }

    let spans = index.into_spans();
    tracing::debug!(
        rules = rules.len(),
        spans = spans.len(),
        bytes = text.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "full highlight pass"
    );
    spans
}

/// Check that `[start, end)` is an ordered range within `len` bytes
pub fn validate_region(len: usize, start: usize, end: usize) -> Result<()> {
    if start > end || end > len {
        return Err(HighlightError::InvalidRange { start, end, len });
    }
    Ok(())
}

/// Re-highlight the lines touched by `[start, end)`
///
/// Spans in `index` that overlap the expanded region are discarded and
/// recomputed; spans elsewhere take part in conflict resolution but are left
/// alone unless a strictly higher-priority match evicts them. Returns `None`
/// (and changes nothing) when the range is not `start <= end <= text.len()`.
pub fn highlight_region(
    text: &str,
    rules: &[Rule],
    index: &mut SpanIndex,
    start: usize,
    end: usize,
) -> Option<RegionHighlight> {
    if let Err(e) = validate_region(text.len(), start, end) {
        tracing::debug!(error = %e, "ignoring region request");
        return None;
    }

    let started = Instant::now();
    let (region_start, region_end) = expand_to_lines(text, start, end);
    let mut lo = region_start;
    let mut hi = region_end;

    for old in index.remove_overlapping(region_start, region_end) {
        lo = lo.min(old.start);
        hi = hi.max(old.end);
    }

    for rule in rules {
        for (m_start, m_end) in rule.find_iter(text) {
            if m_start >= region_end {
                break;
            }
            if m_end <= region_start {
                continue;
            }
            let candidate = Span::new(m_start, m_end, rule.color(), rule.priority());
            if let Some(evicted) = index.try_insert(candidate) {
                lo = lo.min(m_start);
                hi = hi.max(m_end);
                for old in evicted {
                    lo = lo.min(old.start);
                    hi = hi.max(old.end);
                }
            }
        }
    }

    let spans: Vec<Span> = index.spans_within(lo, hi).copied().collect();
    tracing::debug!(
        requested = ?(start..end),
        cleared = ?(lo..hi),
        spans = spans.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "region highlight pass"
    );

    Some(RegionHighlight {
        start: lo,
        end: hi,
        spans,
    })
}

/// Rule set plus the spans accepted by earlier passes
#[derive(Debug, Default)]
pub struct Highlighter {
    rules: RuleSet,
    index: SpanIndex,
}

impl Highlighter {
    /// Create a highlighter with no rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a highlighter over an existing rule set
    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            rules,
            index: SpanIndex::new(),
        }
    }

    pub fn add_rule(&mut self, rule: Rule) -> RuleId {
        self.rules.add(rule)
    }

    pub fn remove_rule(&mut self, id: RuleId) -> bool {
        self.rules.remove(id)
    }

    pub fn clear_rules(&mut self) {
        self.rules.clear();
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Spans accepted so far
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.index.spans()
    }

    /// Forget every accepted span
    pub fn reset(&mut self) {
        self.index.clear();
    }

    /// Highlight the whole text, replacing all previously accepted spans
    pub fn highlight_all(&mut self, text: &str) -> Vec<Span> {
        let spans = highlight_all(text, self.rules.as_slice());
        self.index.clear();
        for span in &spans {
            self.index.try_insert(*span);
        }
        spans
    }

    /// Re-highlight the lines touched by `[start, end)` of `text`
    pub fn highlight_region(&mut self, text: &str, start: usize, end: usize) -> Option<RegionHighlight> {
        highlight_region(text, self.rules.as_slice(), &mut self.index, start, end)
    }
}
