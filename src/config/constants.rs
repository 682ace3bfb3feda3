//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including upstream service defaults, history limits, and the fixed
//! user-facing messages.

/// Default generative model used for intelligence lookups.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Default base URL of the completion service.
///
/// Overridable via `--api-base` so tests and proxies can point elsewhere.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Header carrying the API credential on every completion request.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Default SQLite file backing the durable key-value store.
pub const DB_PATH: &str = "./ip_intel.db";

/// Storage key holding the serialized lookup history.
pub const HISTORY_STORAGE_KEY: &str = "ip_intel_history";

/// Maximum number of history entries kept (newest first).
pub const HISTORY_LIMIT: usize = 10;

// User-facing messages
/// Shown when the submitted text is not a plausible IPv4/IPv6 literal.
pub const INVALID_ADDRESS_MESSAGE: &str = "Please enter a valid IPv4 or IPv6 address.";
/// Shown for every gateway failure. The underlying cause is only logged.
pub const LOOKUP_FAILED_MESSAGE: &str = "Failed to fetch IP information. Please try again.";

// Citation defaults
/// Title used when a grounding citation carries no title.
pub const DEFAULT_SOURCE_TITLE: &str = "Source";
/// Link used when a grounding citation carries no URI.
pub const DEFAULT_SOURCE_URI: &str = "#";

/// Registry label rendered when the upstream service reports none.
pub const REGISTRY_FALLBACK_LABEL: &str = "Automatic Detection";

// Error message size limits
/// Maximum diagnostic message length in characters (2000 chars)
/// Upstream error bodies longer than this are truncated before logging
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 2000;
