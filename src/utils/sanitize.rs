//! Sanitizing of diagnostic text.
//!
//! Upstream error bodies and transport errors are logged, never shown to the
//! user. Before they reach the log they are stripped of control characters
//! and capped in length so a misbehaving service cannot flood the output.

use crate::config::MAX_ERROR_MESSAGE_LENGTH;

/// Removes control characters other than newline, tab and carriage return.
pub fn sanitize_error_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t' | '\r'))
        .collect()
}

/// Sanitizes `message` and truncates it to `MAX_ERROR_MESSAGE_LENGTH` characters.
///
/// Truncation counts characters, not bytes, so multi-byte text is never split.
pub fn sanitize_and_truncate_error_message(message: &str) -> String {
    let sanitized = sanitize_error_message(message);
    let length = sanitized.chars().count();

    if length > MAX_ERROR_MESSAGE_LENGTH {
        // Leave room for the truncation note
        let keep = MAX_ERROR_MESSAGE_LENGTH.saturating_sub(50);
        let head: String = sanitized.chars().take(keep).collect();
        format!("{head}... (truncated, original length: {length} chars)")
    } else {
        sanitized
    }
}
