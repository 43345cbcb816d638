//! The editor widget as seen by the highlighting core
//!
//! The core never owns the text. It reads snapshots through this trait and
//! writes colors back through it, always from the owning thread.

use crate::syntax::Span;

/// First and last visible line of the editor (0-based, inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub first_line: usize,
    pub last_line: usize,
}

/// Notifications raised by the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The text was edited
    TextChanged,
    /// The view scrolled vertically (pixels)
    Scrolled { old_y: i32, new_y: i32 },
}

/// Presentation layer consumed by the scheduler
pub trait EditorSurface {
    /// Copy of the current text
    fn text(&self) -> String;

    /// Current text length in bytes
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `offset` falls on a `char` boundary of the current text
    fn is_char_boundary(&self, offset: usize) -> bool;

    /// Replace the whole text
    fn set_text(&mut self, text: &str);

    fn selection(&self) -> (usize, usize);

    fn set_selection(&mut self, start: usize, end: usize);

    /// Color the given ranges
    fn apply_spans(&mut self, spans: &[Span]);

    /// Remove colors from `[start, end)`
    fn clear_spans(&mut self, start: usize, end: usize);

    /// Colors currently applied, in start order
    fn applied_spans(&self) -> Vec<Span>;

    /// Visible lines, or `None` before the first layout
    fn viewport(&self) -> Option<Viewport>;

    /// Stop reporting text changes (the core is about to write)
    fn mute_changes(&mut self);

    /// Resume reporting text changes
    fn unmute_changes(&mut self);

    /// Drain pending notifications
    fn take_events(&mut self) -> Vec<SurfaceEvent>;

    /// False once the host view has gone away
    fn is_attached(&self) -> bool {
        true
    }
}
