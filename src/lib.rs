//! cglyph - incremental regex syntax highlighting for C-family source
//!
//! The [`syntax`] module holds the engine (rules, passes, scheduler); the
//! other modules wire it to an editable buffer and a terminal.

pub mod buffer;
pub mod config;
pub mod display;
pub mod editor;
pub mod error;
pub mod surface;
pub mod syntax;

pub use buffer::{Layout, StyledBuffer};
pub use config::Config;
pub use editor::CodeEditor;
pub use error::{HighlightError, Result};
pub use surface::{EditorSurface, SurfaceEvent, Viewport};
