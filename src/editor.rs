//! Code editor facade
//!
//! Ties a surface, a rule set and the scheduler together. Everything here
//! runs on the thread that owns the surface; the only other thread is the
//! scheduler's highlight worker.

use std::thread;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::surface::{EditorSurface, SurfaceEvent};
use crate::syntax::{
    Argb, IncrementalScheduler, Rule, RuleId, RuleSet, SchedulerState, Trigger,
};

/// Syntax-highlighting editor over a surface
#[derive(Debug)]
pub struct CodeEditor<S: EditorSurface> {
    surface: S,
    rules: RuleSet,
    scheduler: IncrementalScheduler,
    enabled: bool,
}

impl<S: EditorSurface> CodeEditor<S> {
    /// Create an editor with the default configuration
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, &Config::default())
    }

    /// Create an editor from a configuration
    pub fn with_config(surface: S, config: &Config) -> Self {
        let mut scheduler = IncrementalScheduler::new(config.scheduler_config());
        scheduler.set_enabled(config.highlight.enabled);
        Self {
            surface,
            rules: config.rule_set(),
            scheduler,
            enabled: config.highlight.enabled,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn scheduler(&self) -> &IncrementalScheduler {
        &self.scheduler
    }

    pub fn state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// Replace the whole text and schedule a full pass
    pub fn set_text(&mut self, text: &str, now: Instant) {
        self.surface.mute_changes();
        self.surface.set_text(text);
        self.surface.unmute_changes();
        if text.is_empty() {
            return;
        }
        let delay = self.scheduler.config().set_text_delay;
        self.scheduler.schedule_after(delay, Trigger::SetText, now);
    }

    /// Add a rule; an invalid pattern yields a rule that never matches
    ///
    /// Takes effect from the next scheduled pass.
    pub fn add_rule(&mut self, pattern: &str, color: Argb, multiline: bool, priority: i32) -> RuleId {
        self.rules.add(Rule::new(pattern, color, multiline, priority))
    }

    pub fn remove_rule(&mut self, id: RuleId) -> bool {
        self.rules.remove(id)
    }

    pub fn clear_rules(&mut self) {
        self.rules.clear();
    }

    pub fn is_highlighting_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn highlighting on or off
    ///
    /// Turning it off strips every color right away; turning it back on
    /// schedules a full pass.
    pub fn set_highlighting_enabled(&mut self, enabled: bool, now: Instant) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        self.scheduler.set_enabled(enabled);
        if enabled {
            self.scheduler.request_full(now);
        } else {
            let len = self.surface.len();
            self.surface.mute_changes();
            self.surface.clear_spans(0, len);
            self.surface.unmute_changes();
        }
        tracing::debug!(enabled, "highlighting toggled");
    }

    /// Force a full pass on the next tick
    pub fn refresh(&mut self, now: Instant) {
        self.scheduler.request_full(now);
    }

    /// Highlight the visible lines (plus margin) on the next tick
    pub fn refresh_visible(&mut self, now: Instant) {
        self.scheduler.schedule_after(Duration::ZERO, Trigger::Visible, now);
    }

    /// React to one surface notification
    pub fn handle_event(&mut self, event: SurfaceEvent, now: Instant) {
        if !self.enabled {
            return;
        }
        match event {
            SurfaceEvent::TextChanged => self.scheduler.on_text_changed(now),
            SurfaceEvent::Scrolled { old_y, new_y } => {
                self.scheduler.on_scroll(old_y, new_y, now);
            }
        }
    }

    /// Drain surface events, apply finished passes, start due ones
    pub fn tick(&mut self, now: Instant) {
        for event in self.surface.take_events() {
            self.handle_event(event, now);
        }
        let rules = self.rules.snapshot();
        self.scheduler.tick(&mut self.surface, &rules, now);
    }

    /// Tick until nothing is pending or running, for at most `timeout`
    ///
    /// Returns false on timeout.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            let now = Instant::now();
            self.tick(now);
            match self.scheduler.state() {
                SchedulerState::Idle | SchedulerState::Disposed => return true,
                _ if now >= deadline => return false,
                SchedulerState::Running { .. } => {
                    self.scheduler
                        .wait_and_apply(&mut self.surface, deadline.saturating_duration_since(now));
                }
                SchedulerState::Pending { due, .. } => {
                    thread::sleep(due.min(deadline).saturating_duration_since(now));
                }
            }
        }
    }

    /// Cancel pending work and release the worker
    pub fn dispose(&mut self) {
        self.scheduler.dispose();
    }
}

impl<S: EditorSurface> Drop for CodeEditor<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
