//! Configuration file support
//!
//! Loads settings from ~/.cglyph.toml (or %USERPROFILE%\.cglyph.toml on Windows)
//!
//! Example:
//! ```toml
//! replace_default_rules = false
//!
//! [highlight]
//! enabled = true
//! edit_debounce_ms = 300
//! scroll_debounce_ms = 150
//! margin_lines = 50
//!
//! [[rule]]
//! name = "todo"
//! pattern = "TODO|FIXME"
//! color = "#FFFF00"
//! priority = 40
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{HighlightError, Result};
use crate::syntax::{c_rules, Argb, Rule, RuleSet, SchedulerConfig, TokenType};

/// Upper bound for `margin_lines`
pub const MAX_MARGIN_LINES: usize = 10_000;
/// Upper bound for any configured delay
pub const MAX_DELAY_MS: u64 = 60_000;

/// `[highlight]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enabled: bool,
    pub edit_debounce_ms: u64,
    pub scroll_debounce_ms: u64,
    pub set_text_delay_ms: u64,
    pub scroll_threshold_px: u32,
    pub margin_lines: usize,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        let defaults = SchedulerConfig::default();
        Self {
            enabled: true,
            edit_debounce_ms: defaults.edit_debounce.as_millis() as u64,
            scroll_debounce_ms: defaults.scroll_debounce.as_millis() as u64,
            set_text_delay_ms: defaults.set_text_delay.as_millis() as u64,
            scroll_threshold_px: defaults.scroll_threshold_px,
            margin_lines: defaults.margin_lines,
        }
    }
}

/// One `[[rule]]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleConfig {
    pub pattern: String,
    /// `#RRGGBB`, `#AARRGGBB`, `0xAARRGGBB`, or a token name such as `keyword`
    pub color: String,
    #[serde(default)]
    pub multiline: bool,
    /// Defaults to the token's priority, or 0 for a literal color
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub name: Option<String>,
}

impl RuleConfig {
    /// Build the rule
    ///
    /// An unparseable color is an error; an invalid pattern is not (the rule
    /// just never matches).
    pub fn to_rule(&self) -> Result<Rule> {
        let (color, default_priority) = if let Some(token) = TokenType::from_name(&self.color) {
            (token.default_color(), token.default_priority())
        } else if let Some(color) = Argb::parse(&self.color) {
            (color, 0)
        } else {
            return Err(HighlightError::Message(format!(
                "unknown color '{}' for pattern '{}'",
                self.color, self.pattern
            )));
        };

        let rule = Rule::new(
            &self.pattern,
            color,
            self.multiline,
            self.priority.unwrap_or(default_priority),
        );
        Ok(match &self.name {
            Some(name) => rule.with_name(name),
            None => rule,
        })
    }
}

/// Configuration settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub highlight: HighlightConfig,
    /// Start from an empty rule set instead of the builtin C rules
    pub replace_default_rules: bool,
    #[serde(rename = "rule")]
    pub rules: Vec<RuleConfig>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".cglyph.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".cglyph.toml"))
        }
    }

    /// Load the user's configuration, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };
        if !path.exists() {
            return Config::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                Config::default()
            }
        }
    }

    /// Load configuration from a file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.clamp();
        Ok(config)
    }

    fn clamp(&mut self) {
        let h = &mut self.highlight;
        h.margin_lines = h.margin_lines.min(MAX_MARGIN_LINES);
        h.edit_debounce_ms = h.edit_debounce_ms.min(MAX_DELAY_MS);
        h.scroll_debounce_ms = h.scroll_debounce_ms.min(MAX_DELAY_MS);
        h.set_text_delay_ms = h.set_text_delay_ms.min(MAX_DELAY_MS);
    }

    /// Scheduler timing from the `[highlight]` table
    pub fn scheduler_config(&self) -> SchedulerConfig {
        let h = &self.highlight;
        SchedulerConfig {
            edit_debounce: Duration::from_millis(h.edit_debounce_ms),
            scroll_debounce: Duration::from_millis(h.scroll_debounce_ms),
            set_text_delay: Duration::from_millis(h.set_text_delay_ms),
            scroll_threshold_px: h.scroll_threshold_px,
            margin_lines: h.margin_lines,
        }
    }

    /// Builtin rules (unless replaced) plus the configured ones
    ///
    /// Rules with an unknown color are skipped with a warning.
    pub fn rule_set(&self) -> RuleSet {
        let mut rules = if self.replace_default_rules {
            RuleSet::new()
        } else {
            c_rules()
        };
        for entry in &self.rules {
            match entry.to_rule() {
                Ok(rule) => {
                    rules.add(rule);
                }
                Err(e) => tracing::warn!(error = %e, "skipping configured rule"),
            }
        }
        rules
    }
}
