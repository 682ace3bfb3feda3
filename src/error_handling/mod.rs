//! Error handling and lookup statistics.
//!
//! This module provides:
//! - Error type definitions for every layer (initialization, storage,
//!   completion transport, gateway, validation)
//! - Failure categorization used for diagnostic logging
//! - Lookup statistics tracking (successes and failures by category)
//!
//! Gateway failures are categorized into:
//! - **Transport**: the request never produced a usable HTTP response
//! - **Upstream**: the service answered, but not with a usable completion
//! - **Payload**: the completion text was empty, not JSON, or off-schema

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_gateway_error, categorize_reqwest_error, GatewayFailureKind};
pub use stats::LookupStats;
pub use types::{
    CompletionError, GatewayError, InitializationError, LookupError, StorageError,
    ValidationError,
};
