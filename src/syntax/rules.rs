//! Pattern rules for syntax highlighting
//!
//! A rule pairs a regular expression with a display color and a priority.
//! Rules whose pattern fails to compile are kept but never match, so one bad
//! pattern cannot take down a highlighting pass.

use std::fmt;

use regex::{Regex, RegexBuilder};

use super::style::Argb;
use crate::error::{HighlightError, Result};

/// Name of the capture group that narrows the colored range of a match
pub const HIGHLIGHT_GROUP: &str = "hl";

/// Identifier assigned when a rule joins a [`RuleSet`](super::RuleSet)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RuleId(pub u64);

/// A single highlighting rule
#[derive(Debug, Clone)]
pub struct Rule {
    /// Set by the owning rule set (0 = not yet added)
    pub(crate) id: RuleId,
    /// Name for debugging
    name: Option<String>,
    /// Pattern source
    pattern: String,
    /// Compiled matcher (None = inert, never matches)
    matcher: Option<Regex>,
    /// Index of the `hl` capture group, if the pattern declares one
    highlight_group: Option<usize>,
    /// Color applied to matches
    color: Argb,
    /// Whether `.` crosses lines and `^`/`$` anchor at line boundaries
    multiline: bool,
    /// Priority (higher = wins conflicts)
    priority: i32,
}

impl Rule {
    /// Create a new rule
    ///
    /// Never fails: a pattern that does not compile is logged and the rule
    /// becomes inert.
    pub fn new(pattern: &str, color: Argb, multiline: bool, priority: i32) -> Self {
        let mut rule = Self {
            id: RuleId::default(),
            name: None,
            pattern: pattern.to_string(),
            matcher: None,
            highlight_group: None,
            color,
            multiline,
            priority,
        };
        rule.recompile();
        rule
    }

    /// Builder: attach a debugging name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Compile a pattern with case-sensitive matching
    ///
    /// With `multiline`, `.` matches line terminators and `^`/`$` anchor at
    /// internal line boundaries.
    pub fn compile(pattern: &str, multiline: bool) -> Result<Regex> {
        RegexBuilder::new(pattern)
            .case_insensitive(false)
            .multi_line(multiline)
            .dot_matches_new_line(multiline)
            .build()
            .map_err(|source| HighlightError::PatternCompile {
                pattern: pattern.to_string(),
                source,
            })
    }

    fn recompile(&mut self) {
        match Self::compile(&self.pattern, self.multiline) {
            Ok(regex) => {
                self.highlight_group = regex
                    .capture_names()
                    .position(|name| name == Some(HIGHLIGHT_GROUP));
                self.matcher = Some(regex);
            }
            Err(e) => {
                tracing::error!(rule = ?self.name, "{e}; rule will never match");
                self.matcher = None;
                self.highlight_group = None;
            }
        }
    }

    pub fn id(&self) -> RuleId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn color(&self) -> Argb {
        self.color
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// True when the pattern failed to compile
    pub fn is_inert(&self) -> bool {
        self.matcher.is_none()
    }

    /// Replace the pattern (recompiles)
    pub fn set_pattern(&mut self, pattern: &str) {
        self.pattern = pattern.to_string();
        self.recompile();
    }

    /// Toggle multiline matching (recompiles only on change)
    pub fn set_multiline(&mut self, multiline: bool) {
        if self.multiline != multiline {
            self.multiline = multiline;
            self.recompile();
        }
    }

    pub fn set_color(&mut self, color: Argb) {
        self.color = color;
    }

    pub fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }

    /// Iterate the colored ranges of all non-overlapping matches in `text`
    ///
    /// Standard leftmost-first semantics. Empty ranges are skipped. When the
    /// pattern has an `hl` group only that group is reported.
    pub fn find_iter<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = (usize, usize)> + 'a> {
        let Some(regex) = self.matcher.as_ref() else {
            return Box::new(std::iter::empty());
        };

        match self.highlight_group {
            Some(group) => Box::new(regex.captures_iter(text).filter_map(move |caps| {
                let m = caps.get(group)?;
                (m.start() < m.end()).then(|| (m.start(), m.end()))
            })),
            None => Box::new(
                regex
                    .find_iter(text)
                    .filter(|m| m.start() < m.end())
                    .map(|m| (m.start(), m.end())),
            ),
        }
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
            && self.color == other.color
            && self.multiline == other.multiline
            && self.priority == other.priority
    }
}

impl Eq for Rule {}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rule{{pattern='{}', color={}, multiline={}, priority={}}}",
            self.pattern, self.color, self.multiline, self.priority
        )
    }
}
