//! Interactive terminal surface.
//!
//! This module provides the line-oriented REPL, state rendering, and
//! end-of-session statistics used by the main binary.

pub mod render;
pub mod repl;
pub mod statistics;

// Re-export public API
pub use render::{render_history, render_result, render_state};
pub use repl::{parse_command, run_repl, Command};
pub use statistics::print_lookup_statistics;
