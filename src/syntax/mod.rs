//! Syntax highlighting
//!
//! This module provides:
//! - Rules (regex + color + priority) and priority-ordered rule sets
//! - Full and region-limited highlighting passes
//! - A debounced scheduler that runs passes on a background thread

mod style;
mod tokens;
mod rules;
mod rule_set;
mod span_index;
mod highlighter;
mod builtin;
mod worker;
mod scheduler;

pub use style::{Argb, Span};
pub use tokens::TokenType;
pub use rules::{Rule, RuleId, HIGHLIGHT_GROUP};
pub use rule_set::{RuleSet, RuleSnapshot};
pub use span_index::SpanIndex;
pub use highlighter::{
    expand_to_lines, highlight_all, highlight_region, validate_region, Highlighter, RegionHighlight,
};
pub use builtin::c_rules;
pub use worker::{HighlightJob, HighlightOutcome, HighlightWorker, PassTarget};
pub use scheduler::{
    line_range, Debouncer, IncrementalScheduler, SchedulerConfig, SchedulerState, SchedulerStats,
    Trigger, EDIT_DEBOUNCE, MARGIN_LINES, SCROLL_DEBOUNCE, SCROLL_THRESHOLD_PX, SET_TEXT_DELAY,
};
