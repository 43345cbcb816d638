//! Debounced, incremental highlighting
//!
//! The scheduler lives on the thread that owns the editor surface. Events arm
//! a single-slot timer; when it fires, a text snapshot is taken and handed
//! to the [`HighlightWorker`]. Outcomes come back over a channel and are
//! applied on the owning thread during [`tick`](IncrementalScheduler::tick).
//!
//! Time is passed in by the caller so the state machine can be driven
//! deterministically.
//!
//! ```text
//! Idle --event--> Pending --due--> Running --applied--> Idle
//!                    ^                 |
//!                    +----event--------+ (Running with a pending timer)
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::rule_set::RuleSnapshot;
use super::style::Span;
use super::worker::{HighlightJob, HighlightOutcome, HighlightWorker, PassTarget};
use crate::surface::EditorSurface;

/// Debounce after a text edit
pub const EDIT_DEBOUNCE: Duration = Duration::from_millis(300);
/// Debounce after a scroll
pub const SCROLL_DEBOUNCE: Duration = Duration::from_millis(150);
/// Delay before the pass that follows replacing the whole text
pub const SET_TEXT_DELAY: Duration = Duration::from_millis(100);
/// Minimum vertical scroll, in pixels, that re-highlights
pub const SCROLL_THRESHOLD_PX: u32 = 100;
/// Lines highlighted above and below the visible area
pub const MARGIN_LINES: usize = 50;

/// What armed the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Edit,
    Scroll,
    SetText,
    Refresh,
    /// Visible-area pass requested by the host
    Visible,
}

impl Trigger {
    /// Whether the pass covers the whole text regardless of the viewport
    pub fn wants_full(self) -> bool {
        matches!(self, Trigger::SetText | Trigger::Refresh)
    }

    /// Combine a superseded trigger with its replacement
    ///
    /// A pending full pass is never downgraded to a window pass.
    fn merge(self, next: Trigger) -> Trigger {
        if self.wants_full() && !next.wants_full() {
            self
        } else {
            next
        }
    }
}

/// Single-slot timer
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    deadline: Option<(Instant, Trigger)>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)arm to fire `delay` after `now`, replacing any waiting deadline
    pub fn arm(&mut self, now: Instant, delay: Duration, trigger: Trigger) {
        let trigger = match self.deadline {
            Some((_, previous)) => previous.merge(trigger),
            None => trigger,
        };
        self.deadline = Some((now + delay, trigger));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the timer fires, if armed
    pub fn due(&self) -> Option<Instant> {
        self.deadline.map(|(due, _)| due)
    }

    pub fn trigger(&self) -> Option<Trigger> {
        self.deadline.map(|(_, trigger)| trigger)
    }

    /// Disarm and return the trigger once `now` reaches the deadline
    pub fn fire_if_due(&mut self, now: Instant) -> Option<Trigger> {
        match self.deadline {
            Some((due, trigger)) if now >= due => {
                self.deadline = None;
                Some(trigger)
            }
            _ => None,
        }
    }
}

/// Timing and window parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub edit_debounce: Duration,
    pub scroll_debounce: Duration,
    pub set_text_delay: Duration,
    pub scroll_threshold_px: u32,
    pub margin_lines: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            edit_debounce: EDIT_DEBOUNCE,
            scroll_debounce: SCROLL_DEBOUNCE,
            set_text_delay: SET_TEXT_DELAY,
            scroll_threshold_px: SCROLL_THRESHOLD_PX,
            margin_lines: MARGIN_LINES,
        }
    }
}

/// Observable scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Pending { due: Instant, trigger: Trigger },
    /// A pass is computing; `pending` is the next timer, if one is armed
    Running { pass: u64, pending: Option<Instant> },
    Disposed,
}

/// Pass counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub passes_dispatched: u64,
    pub passes_applied: u64,
    pub passes_skipped: u64,
}

/// Drives highlighting passes for one editor surface
#[derive(Debug)]
pub struct IncrementalScheduler {
    config: SchedulerConfig,
    timer: Debouncer,
    /// None if the thread could not be started; passes then run inline
    worker: Option<HighlightWorker>,
    in_flight: Option<u64>,
    next_pass: u64,
    stats: SchedulerStats,
    enabled: bool,
    disposed: bool,
}

impl IncrementalScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        let worker = match HighlightWorker::spawn() {
            Ok(worker) => Some(worker),
            Err(e) => {
                tracing::warn!(error = %e, "highlight worker unavailable, highlighting inline");
                None
            }
        };
        Self {
            config,
            timer: Debouncer::new(),
            worker,
            in_flight: None,
            next_pass: 0,
            stats: SchedulerStats::default(),
            enabled: true,
            disposed: false,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn state(&self) -> SchedulerState {
        if self.disposed {
            return SchedulerState::Disposed;
        }
        match (self.in_flight, self.timer.deadline) {
            (Some(pass), _) => SchedulerState::Running {
                pass,
                pending: self.timer.due(),
            },
            (None, Some((due, trigger))) => SchedulerState::Pending { due, trigger },
            (None, None) => SchedulerState::Idle,
        }
    }

    /// Whether a pass is computing or a timer is armed
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some() || self.timer.is_armed()
    }

    /// Text was edited
    pub fn on_text_changed(&mut self, now: Instant) {
        self.schedule_after(self.config.edit_debounce, Trigger::Edit, now);
    }

    /// The view scrolled; returns whether a pass was scheduled
    pub fn on_scroll(&mut self, old_y: i32, new_y: i32, now: Instant) -> bool {
        let moved = (new_y as i64 - old_y as i64).unsigned_abs();
        if moved <= self.config.scroll_threshold_px as u64 {
            return false;
        }
        self.schedule_after(self.config.scroll_debounce, Trigger::Scroll, now)
    }

    /// Arm the timer, superseding anything still waiting
    pub fn schedule_after(&mut self, delay: Duration, trigger: Trigger, now: Instant) -> bool {
        if self.disposed || !self.enabled {
            return false;
        }
        self.timer.arm(now, delay, trigger);
        tracing::debug!(
            ?trigger,
            delay_ms = delay.as_millis() as u64,
            running = self.in_flight.is_some(),
            "highlight pass scheduled"
        );
        true
    }

    /// Schedule a full pass to run on the next tick
    pub fn request_full(&mut self, now: Instant) -> bool {
        self.schedule_after(Duration::ZERO, Trigger::Refresh, now)
    }

    /// Apply finished results, then start a pass if one is due
    pub fn tick<S>(&mut self, surface: &mut S, rules: &RuleSnapshot, now: Instant)
    where
        S: EditorSurface + ?Sized,
    {
        if self.disposed {
            return;
        }
        self.apply_ready(surface);
        if self.in_flight.is_some() {
            return;
        }
        if let Some(trigger) = self.timer.fire_if_due(now) {
            self.dispatch(surface, rules, trigger);
        }
    }

    /// Apply the in-flight result if it has arrived; never blocks
    pub fn apply_ready<S>(&mut self, surface: &mut S) -> bool
    where
        S: EditorSurface + ?Sized,
    {
        let Some(outcome) = self.worker.as_ref().and_then(|w| w.try_recv()) else {
            return false;
        };
        self.finish(surface, outcome)
    }

    /// Block up to `timeout` for the in-flight result and apply it
    pub fn wait_and_apply<S>(&mut self, surface: &mut S, timeout: Duration) -> bool
    where
        S: EditorSurface + ?Sized,
    {
        if self.in_flight.is_none() {
            return false;
        }
        let Some(outcome) = self.worker.as_ref().and_then(|w| w.recv_timeout(timeout)) else {
            return false;
        };
        self.finish(surface, outcome)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.timer.cancel();
        }
    }

    /// Cancel the timer and release the worker
    ///
    /// A running pass finishes on its own but its result is never applied.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.timer.cancel();
        if let Some(mut worker) = self.worker.take() {
            worker.shutdown();
        }
        self.in_flight = None;
        self.disposed = true;
        tracing::debug!(stats = ?self.stats, "highlight scheduler disposed");
    }

    fn dispatch<S>(&mut self, surface: &mut S, rules: &RuleSnapshot, trigger: Trigger)
    where
        S: EditorSurface + ?Sized,
    {
        let text = surface.text();
        let target = if trigger.wants_full() {
            PassTarget::Full
        } else {
            self.window(surface, &text).unwrap_or(PassTarget::Full)
        };

        // Spans outside a region still decide what a crossing match may claim
        let seed: Arc<[Span]> = match target {
            PassTarget::Full => Arc::from(Vec::new()),
            PassTarget::Region { .. } => Arc::from(surface.applied_spans()),
        };

        self.next_pass += 1;
        let job = HighlightJob {
            pass: self.next_pass,
            text: Arc::from(text),
            rules: Arc::clone(rules),
            target,
            seed,
        };
        self.stats.passes_dispatched += 1;
        tracing::debug!(pass = job.pass, ?trigger, ?target, "dispatching highlight pass");

        let job = match &self.worker {
            Some(worker) => match worker.submit(job.clone()) {
                Ok(()) => {
                    self.in_flight = Some(job.pass);
                    return;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "highlight worker gone, highlighting inline");
                    job
                }
            },
            None => job,
        };
        self.worker = None;
        let outcome = job.run();
        self.apply(surface, outcome);
    }

    /// Visible lines plus margin as a byte range
    fn window<S>(&self, surface: &S, text: &str) -> Option<PassTarget>
    where
        S: EditorSurface + ?Sized,
    {
        let viewport = surface.viewport()?;
        let first = viewport.first_line.saturating_sub(self.config.margin_lines);
        let last = viewport.last_line.saturating_add(self.config.margin_lines);
        let (start, end) = line_range(text, first, last);
        Some(PassTarget::Region { start, end })
    }

    fn finish<S>(&mut self, surface: &mut S, outcome: HighlightOutcome) -> bool
    where
        S: EditorSurface + ?Sized,
    {
        if self.in_flight != Some(outcome.pass) {
            tracing::debug!(pass = outcome.pass, "dropping result of an abandoned pass");
            return false;
        }
        self.in_flight = None;
        self.apply(surface, outcome)
    }

    /// Write an outcome into the surface without re-triggering the scheduler
    fn apply<S>(&mut self, surface: &mut S, outcome: HighlightOutcome) -> bool
    where
        S: EditorSurface + ?Sized,
    {
        if self.disposed || !self.enabled || !surface.is_attached() {
            self.stats.passes_skipped += 1;
            tracing::debug!(pass = outcome.pass, "skipping highlight result");
            return false;
        }

        let len = surface.len();
        let total = outcome.spans.len();
        let spans: Vec<Span> = outcome
            .spans
            .into_iter()
            .filter_map(|span| clamp_span(span, len, |i| surface.is_char_boundary(i)))
            .collect();
        if spans.len() != total || outcome.end > len {
            tracing::warn!(
                pass = outcome.pass,
                dropped = total - spans.len(),
                len,
                "text changed under a highlight pass, clamping"
            );
        }

        let (sel_start, sel_end) = surface.selection();
        surface.mute_changes();
        surface.clear_spans(outcome.start.min(len), outcome.end.min(len));
        surface.apply_spans(&spans);
        if sel_start <= len && sel_end <= len {
            surface.set_selection(sel_start, sel_end);
        }
        surface.unmute_changes();

        self.stats.passes_applied += 1;
        tracing::debug!(pass = outcome.pass, spans = spans.len(), "highlight result applied");
        true
    }
}

impl Default for IncrementalScheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl Drop for IncrementalScheduler {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Fit a span computed on an older snapshot into a text of `len` bytes
fn clamp_span(span: Span, len: usize, is_boundary: impl Fn(usize) -> bool) -> Option<Span> {
    if span.start >= len {
        return None;
    }
    let end = span.end.min(len);
    if end <= span.start || !is_boundary(span.start) || !is_boundary(end) {
        return None;
    }
    Some(Span { end, ..span })
}

/// Byte range from the start of `first` to the end of `last` (lines clamp)
pub fn line_range(text: &str, first: usize, last: usize) -> (usize, usize) {
    let mut start = if first == 0 { 0 } else { text.len() };
    let mut end = text.len();
    for (line, (i, _)) in text.match_indices('\n').enumerate() {
        if line + 1 == first {
            start = i + 1;
        }
        if line == last {
            end = i;
            break;
        }
    }
    (start.min(end), end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{Layout, StyledBuffer};
    use crate::syntax::builtin::c_rules;
    use crate::syntax::style::Argb;
    use crate::syntax::tokens::TokenType;

    const WAIT: Duration = Duration::from_secs(5);

    fn rules() -> RuleSnapshot {
        c_rules().snapshot()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Tick at `now`, then block until any dispatched pass is applied
    fn settle(scheduler: &mut IncrementalScheduler, buffer: &mut StyledBuffer, now: Instant) {
        scheduler.tick(buffer, &rules(), now);
        scheduler.wait_and_apply(buffer, WAIT);
    }

    #[test]
    fn test_debouncer_rearm_and_fire() {
        let t0 = Instant::now();
        let mut timer = Debouncer::new();
        timer.arm(t0, ms(300), Trigger::Edit);
        timer.arm(t0 + ms(100), ms(300), Trigger::Edit);
        assert_eq!(timer.due(), Some(t0 + ms(400)));
        assert_eq!(timer.fire_if_due(t0 + ms(399)), None);
        assert_eq!(timer.fire_if_due(t0 + ms(400)), Some(Trigger::Edit));
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_debouncer_keeps_full_trigger() {
        let t0 = Instant::now();
        let mut timer = Debouncer::new();
        timer.arm(t0, ms(100), Trigger::SetText);
        timer.arm(t0, ms(300), Trigger::Edit);
        assert_eq!(timer.trigger(), Some(Trigger::SetText));
        timer.cancel();
        timer.arm(t0, ms(300), Trigger::Edit);
        timer.arm(t0, ms(0), Trigger::Refresh);
        assert_eq!(timer.trigger(), Some(Trigger::Refresh));
    }

    #[test]
    fn test_line_range() {
        let text = "a\nbb\nccc\n";
        assert_eq!(line_range(text, 0, 0), (0, 1));
        assert_eq!(line_range(text, 1, 2), (2, 8));
        assert_eq!(line_range(text, 2, 99), (5, 9));
        assert_eq!(line_range(text, 3, 3), (9, 9));
        assert_eq!(line_range(text, 7, 9), (9, 9));
    }

    #[test]
    fn test_rapid_edits_collapse_to_one_pass() {
        let t0 = Instant::now();
        let mut buffer = StyledBuffer::from_text("int x = 5;\n");
        let mut scheduler = IncrementalScheduler::default();

        for i in 0..5 {
            let now = t0 + ms(50 * i);
            scheduler.on_text_changed(now);
            scheduler.tick(&mut buffer, &rules(), now);
        }
        // Last edit at +200ms, so nothing is due before +500ms
        scheduler.tick(&mut buffer, &rules(), t0 + ms(450));
        assert_eq!(scheduler.stats().passes_dispatched, 0);
        assert!(matches!(scheduler.state(), SchedulerState::Pending { trigger: Trigger::Edit, .. }));

        settle(&mut scheduler, &mut buffer, t0 + ms(500));
        settle(&mut scheduler, &mut buffer, t0 + ms(2000));
        let stats = scheduler.stats();
        assert_eq!(stats.passes_dispatched, 1);
        assert_eq!(stats.passes_applied, 1);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert_eq!(buffer.color_at(0), Some(TokenType::Keyword.default_color()));
    }

    #[test]
    fn test_small_scroll_is_ignored() {
        let t0 = Instant::now();
        let mut scheduler = IncrementalScheduler::default();
        assert!(!scheduler.on_scroll(0, 100, t0));
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert!(scheduler.on_scroll(300, 150, t0));
        assert_eq!(
            scheduler.state(),
            SchedulerState::Pending {
                due: t0 + SCROLL_DEBOUNCE,
                trigger: Trigger::Scroll
            }
        );
    }

    #[test]
    fn test_selection_preserved() {
        let t0 = Instant::now();
        let mut buffer = StyledBuffer::from_text("int main(void) { return 0; }\n");
        buffer.set_selection(5, 5);
        let mut scheduler = IncrementalScheduler::default();

        scheduler.request_full(t0);
        settle(&mut scheduler, &mut buffer, t0);
        assert_eq!(scheduler.stats().passes_applied, 1);
        assert_eq!(buffer.selection(), (5, 5));
        assert!(buffer.spans().count() > 0);
    }

    #[test]
    fn test_edit_while_running_queues_next_pass() {
        let t0 = Instant::now();
        let mut buffer = StyledBuffer::from_text("int a;\n");
        let mut scheduler = IncrementalScheduler::default();

        scheduler.request_full(t0);
        scheduler.tick(&mut buffer, &rules(), t0);
        let SchedulerState::Running { pass, pending: None } = scheduler.state() else {
            panic!("expected a running pass, got {:?}", scheduler.state());
        };

        buffer.insert_str(7, "int b;\n");
        scheduler.on_text_changed(t0 + ms(10));
        assert_eq!(
            scheduler.state(),
            SchedulerState::Running {
                pass,
                pending: Some(t0 + ms(310))
            }
        );

        scheduler.wait_and_apply(&mut buffer, WAIT);
        assert_eq!(scheduler.stats().passes_dispatched, 1);
        assert!(matches!(scheduler.state(), SchedulerState::Pending { .. }));

        settle(&mut scheduler, &mut buffer, t0 + ms(400));
        let stats = scheduler.stats();
        assert_eq!(stats.passes_dispatched, 2);
        assert_eq!(stats.passes_applied, 2);
        assert_eq!(buffer.color_at(7), Some(TokenType::Keyword.default_color()));
    }

    #[test]
    fn test_window_pass_limits_work_to_viewport() {
        let t0 = Instant::now();
        let mut buffer = StyledBuffer::from_text(&"int x;\n".repeat(400));
        buffer.set_layout(Layout {
            line_height_px: 10,
            height_px: 100,
        });
        buffer.scroll_to_line(200);
        buffer.take_events();
        let mut scheduler = IncrementalScheduler::default();

        scheduler.on_text_changed(t0);
        settle(&mut scheduler, &mut buffer, t0 + EDIT_DEBOUNCE);

        let keyword = Some(TokenType::Keyword.default_color());
        let line = |n: usize| n * 7;
        assert_eq!(buffer.color_at(line(200)), keyword);
        assert_eq!(buffer.color_at(line(150)), keyword);
        assert_eq!(buffer.color_at(line(260)), keyword);
        assert_eq!(buffer.color_at(line(149)), None);
        assert_eq!(buffer.color_at(line(0)), None);
        assert_eq!(buffer.color_at(line(399)), None);
    }

    #[test]
    fn test_window_pass_keeps_outside_string_over_crossing_comment() {
        let t0 = Instant::now();
        let text = format!(
            "\"a /* b\"\n{}x */ y\n{}",
            "int x;\n".repeat(199),
            "int x;\n".repeat(199)
        );
        let mut buffer = StyledBuffer::from_text(&text);
        buffer.set_layout(Layout {
            line_height_px: 10,
            height_px: 100,
        });
        buffer.scroll_to_line(200);
        buffer.take_events();
        let mut scheduler = IncrementalScheduler::default();

        scheduler.request_full(t0);
        settle(&mut scheduler, &mut buffer, t0);
        let before: Vec<Span> = buffer.spans().copied().collect();
        assert_eq!(buffer.color_at(4), Some(TokenType::String.default_color()));

        scheduler.on_text_changed(t0);
        settle(&mut scheduler, &mut buffer, t0 + EDIT_DEBOUNCE);

        // Line 160 sits inside the window the edit pass recomputed
        let line_160 = 9 + 159 * 7;
        assert_eq!(&text[line_160..line_160 + 3], "int");
        assert_eq!(buffer.color_at(4), Some(TokenType::String.default_color()));
        assert_eq!(buffer.color_at(line_160), Some(TokenType::Keyword.default_color()));
        assert_eq!(buffer.spans().copied().collect::<Vec<_>>(), before);
    }

    #[test]
    fn test_no_layout_falls_back_to_full_pass() {
        let t0 = Instant::now();
        let mut buffer = StyledBuffer::from_text(&"int x;\n".repeat(400));
        let mut scheduler = IncrementalScheduler::default();

        scheduler.on_text_changed(t0);
        settle(&mut scheduler, &mut buffer, t0 + EDIT_DEBOUNCE);
        let keyword = Some(TokenType::Keyword.default_color());
        assert_eq!(buffer.color_at(0), keyword);
        assert_eq!(buffer.color_at(399 * 7), keyword);
    }

    #[test]
    fn test_stale_result_is_clamped() {
        let mut buffer = StyledBuffer::from_text("int x;");
        let mut scheduler = IncrementalScheduler::default();
        let red = Argb(0xFFFF_0000);
        let outcome = HighlightOutcome {
            pass: 1,
            start: 0,
            end: 40,
            spans: vec![
                Span::new(0, 3, red, 20),
                Span::new(4, 12, red, 10),
                Span::new(20, 30, red, 10),
            ],
        };
        assert!(scheduler.apply(&mut buffer, outcome));
        let applied: Vec<_> = buffer.spans().map(|s| (s.start, s.end)).collect();
        assert_eq!(applied, vec![(0, 3), (4, 6)]);
    }

    #[test]
    fn test_clamp_respects_char_boundaries() {
        let text = "aé";
        let span = Span::new(0, 2, Argb::WHITE, 1);
        assert_eq!(clamp_span(span, text.len(), |i| text.is_char_boundary(i)), None);
        let span = Span::new(0, 9, Argb::WHITE, 1);
        assert_eq!(
            clamp_span(span, text.len(), |i| text.is_char_boundary(i)),
            Some(Span::new(0, 3, Argb::WHITE, 1))
        );
    }

    #[test]
    fn test_apply_does_not_report_changes() {
        let t0 = Instant::now();
        let mut buffer = StyledBuffer::from_text("return 1;");
        let mut scheduler = IncrementalScheduler::default();
        scheduler.request_full(t0);
        settle(&mut scheduler, &mut buffer, t0);
        assert!(buffer.take_events().is_empty());
    }

    #[test]
    fn test_detached_surface_skips_result() {
        let t0 = Instant::now();
        let mut buffer = StyledBuffer::from_text("int x;");
        let mut scheduler = IncrementalScheduler::default();
        scheduler.request_full(t0);
        scheduler.tick(&mut buffer, &rules(), t0);
        buffer.detach();
        scheduler.wait_and_apply(&mut buffer, WAIT);
        assert_eq!(scheduler.stats().passes_skipped, 1);
        assert_eq!(buffer.spans().count(), 0);
    }

    #[test]
    fn test_dispose_cancels_and_drops_results() {
        let t0 = Instant::now();
        let mut buffer = StyledBuffer::from_text("int x;");
        let mut scheduler = IncrementalScheduler::default();
        scheduler.request_full(t0);
        scheduler.tick(&mut buffer, &rules(), t0);
        scheduler.on_text_changed(t0);

        scheduler.dispose();
        assert_eq!(scheduler.state(), SchedulerState::Disposed);
        assert!(!scheduler.schedule_after(EDIT_DEBOUNCE, Trigger::Edit, t0));
        scheduler.tick(&mut buffer, &rules(), t0 + ms(1000));
        assert!(!scheduler.wait_and_apply(&mut buffer, ms(50)));
        assert_eq!(buffer.spans().count(), 0);
    }

    #[test]
    fn test_disabled_ignores_events() {
        let t0 = Instant::now();
        let mut scheduler = IncrementalScheduler::default();
        scheduler.on_text_changed(t0);
        scheduler.set_enabled(false);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        scheduler.on_text_changed(t0);
        assert!(!scheduler.is_busy());
    }
}
