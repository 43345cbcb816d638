//! Styled text buffer - text, selection, and color ranges
//!
//! This is the in-memory editor surface used by the binary and the tests.
//! Color ranges follow the text through edits: insertions inside a range
//! grow it, insertions at its edges do not.

use std::collections::{BTreeMap, VecDeque};

use crate::surface::{EditorSurface, SurfaceEvent, Viewport};
use crate::syntax::{Argb, Span};

/// Pixel geometry of the visible area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Height of one text line in pixels
    pub line_height_px: u32,
    /// Height of the visible area in pixels
    pub height_px: u32,
}

/// A text buffer with inline colors
#[derive(Debug)]
pub struct StyledBuffer {
    /// Text content
    text: String,
    /// Color ranges keyed by start offset (never overlapping)
    spans: BTreeMap<usize, Span>,
    /// Selection (start, end); equal ends = cursor
    selection: (usize, usize),
    /// None until the host lays the view out
    layout: Option<Layout>,
    /// Vertical scroll offset in pixels
    scroll_y: i32,
    /// Whether text changes are currently unreported
    muted: bool,
    /// Whether the host view is alive
    attached: bool,
    /// Pending notifications
    events: VecDeque<SurfaceEvent>,
}

impl StyledBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self {
            text: String::new(),
            spans: BTreeMap::new(),
            selection: (0, 0),
            layout: None,
            scroll_y: 0,
            muted: false,
            attached: true,
            events: VecDeque::new(),
        }
    }

    /// Create a buffer holding `text` (no events are queued)
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.text = text.to_string();
        buffer
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of lines (a trailing newline starts an empty last line)
    pub fn line_count(&self) -> usize {
        self.text.bytes().filter(|&b| b == b'\n').count() + 1
    }

    /// Byte offset where `line` starts, or None past the last line
    pub fn line_start(&self, line: usize) -> Option<usize> {
        if line == 0 {
            return Some(0);
        }
        self.text
            .match_indices('\n')
            .nth(line - 1)
            .map(|(i, _)| i + 1)
    }

    /// Color ranges in start order
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.spans.values()
    }

    /// Color at a byte position, if any
    pub fn color_at(&self, pos: usize) -> Option<Argb> {
        self.spans
            .range(..=pos)
            .next_back()
            .map(|(_, span)| span)
            .filter(|span| span.contains(pos))
            .map(|span| span.color)
    }

    /// Set the pixel geometry (first layout makes the viewport known)
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = Some(layout);
    }

    pub fn scroll_y(&self) -> i32 {
        self.scroll_y
    }

    /// Scroll to a pixel offset and report it
    pub fn scroll_to(&mut self, y: i32) {
        let old_y = self.scroll_y;
        self.scroll_y = y.max(0);
        if old_y != self.scroll_y {
            self.events.push_back(SurfaceEvent::Scrolled {
                old_y,
                new_y: self.scroll_y,
            });
        }
    }

    /// Scroll so that `line` is the first visible line
    pub fn scroll_to_line(&mut self, line: usize) {
        let line_height = self.layout.map_or(1, |l| l.line_height_px.max(1));
        let y = (line as u64 * line_height as u64).min(i32::MAX as u64) as i32;
        self.scroll_to(y);
    }

    /// Mark the host view as gone
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Insert text at a byte position
    pub fn insert_str(&mut self, pos: usize, s: &str) {
        if s.is_empty() || pos > self.text.len() || !self.text.is_char_boundary(pos) {
            return;
        }
        self.text.insert_str(pos, s);
        let n = s.len();

        let shifted: Vec<Span> = std::mem::take(&mut self.spans)
            .into_values()
            .map(|mut span| {
                if span.start >= pos {
                    span.start += n;
                    span.end += n;
                } else if span.end > pos {
                    span.end += n;
                }
                span
            })
            .collect();
        self.spans = shifted.into_iter().map(|s| (s.start, s)).collect();

        let shift = |p: usize| if p >= pos { p + n } else { p };
        self.selection = (shift(self.selection.0), shift(self.selection.1));
        self.text_changed();
    }

    /// Delete the bytes in `[start, end)`
    pub fn delete_range(&mut self, start: usize, end: usize) {
        if start >= end
            || end > self.text.len()
            || !self.text.is_char_boundary(start)
            || !self.text.is_char_boundary(end)
        {
            return;
        }
        self.text.replace_range(start..end, "");
        let n = end - start;

        let remap = |p: usize| {
            if p <= start {
                p
            } else if p >= end {
                p - n
            } else {
                start
            }
        };
        let kept: Vec<Span> = std::mem::take(&mut self.spans)
            .into_values()
            .map(|span| Span {
                start: remap(span.start),
                end: remap(span.end),
                ..span
            })
            .filter(|span| !span.is_empty())
            .collect();
        self.spans = kept.into_iter().map(|s| (s.start, s)).collect();

        self.selection = (remap(self.selection.0), remap(self.selection.1));
        self.text_changed();
    }

    fn text_changed(&mut self) {
        if !self.muted {
            self.events.push_back(SurfaceEvent::TextChanged);
        }
    }
}

impl Default for StyledBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSurface for StyledBuffer {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn len(&self) -> usize {
        self.text.len()
    }

    fn is_char_boundary(&self, offset: usize) -> bool {
        self.text.is_char_boundary(offset)
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.spans.clear();
        self.selection = (0, 0);
        self.text_changed();
    }

    fn selection(&self) -> (usize, usize) {
        self.selection
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.text.len();
        self.selection = (start.min(len), end.min(len));
    }

    fn apply_spans(&mut self, spans: &[Span]) {
        for span in spans {
            if span.is_empty() || span.end > self.text.len() {
                continue;
            }
            self.clear_spans(span.start, span.end);
            self.spans.insert(span.start, *span);
        }
    }

    fn clear_spans(&mut self, start: usize, end: usize) {
        let hit: Vec<usize> = self
            .spans
            .range(..end)
            .rev()
            .take_while(|(_, span)| span.end > start)
            .map(|(&key, _)| key)
            .collect();

        for key in hit {
            let Some(span) = self.spans.remove(&key) else {
                continue;
            };
            // Keep the parts that stick out of the cleared range
            if span.start < start {
                self.spans.insert(span.start, Span { end: start, ..span });
            }
            if span.end > end {
                self.spans.insert(end, Span { start: end, ..span });
            }
        }
    }

    fn applied_spans(&self) -> Vec<Span> {
        self.spans.values().copied().collect()
    }

    fn viewport(&self) -> Option<Viewport> {
        let layout = self.layout?;
        let line_height = layout.line_height_px.max(1) as u64;
        let top = self.scroll_y.max(0) as u64;
        let last_line = self.line_count() - 1;
        let first_line = ((top / line_height) as usize).min(last_line);
        let bottom = top + layout.height_px as u64;
        let last_visible = ((bottom / line_height) as usize).clamp(first_line, last_line);
        Some(Viewport {
            first_line,
            last_line: last_visible,
        })
    }

    fn mute_changes(&mut self) {
        self.muted = true;
    }

    fn unmute_changes(&mut self) {
        self.muted = false;
    }

    fn take_events(&mut self) -> Vec<SurfaceEvent> {
        self.events.drain(..).collect()
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}
