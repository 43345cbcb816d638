//! Built-in rule sets
//!
//! The editor ships one language: C, with the OpenGL ES / EGL vocabulary
//! that user programs render through.

mod c;

pub use c::c_rules;
