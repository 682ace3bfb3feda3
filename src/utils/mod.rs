//! Utility functions.
//!
//! This module provides string sanitization for diagnostic logging.

pub mod sanitize;

pub use sanitize::sanitize_and_truncate_error_message;
