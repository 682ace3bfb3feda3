//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

use crate::config::{INVALID_ADDRESS_MESSAGE, LOOKUP_FAILED_MESSAGE};

use super::categorization::{categorize_gateway_error, GatewayFailureKind};

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for the durable key-value store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreation(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    /// Schema migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A value could not be serialized for storage.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised by a completion backend.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// The HTTP request could not be built, sent, or read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] ReqwestError),

    /// The service answered with a non-success status.
    #[error("completion service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Sanitized, truncated response body
        body: String,
    },

    /// The service's response envelope was not the expected JSON shape.
    #[error("failed to decode completion envelope: {0}")]
    Decode(#[source] serde_json::Error),

    /// The envelope decoded but held no candidate.
    #[error("completion response contained no candidates")]
    MissingCandidate,
}

/// Diagnostic cause of a failed intelligence lookup.
///
/// Never shown to the end user; see [`LookupError`].
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The completion call itself failed.
    #[error(transparent)]
    Completion(#[from] CompletionError),

    /// The service returned no text.
    #[error("completion returned an empty body")]
    EmptyResponse,

    /// The returned text was not valid JSON.
    #[error("completion body is not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    /// The JSON did not match the declared response schema.
    #[error("completion body does not match the response schema: {0}")]
    SchemaMismatch(String),
}

/// User-facing lookup failure.
///
/// Displays only the fixed retry message; the underlying [`GatewayError`]
/// is kept for logging and exposed through [`LookupError::cause`] and
/// [`std::error::Error::source`].
#[derive(Error, Debug)]
#[error("{}", LOOKUP_FAILED_MESSAGE)]
pub struct LookupError {
    #[source]
    cause: GatewayError,
}

impl LookupError {
    /// Wraps a diagnostic cause.
    pub fn new(cause: GatewayError) -> Self {
        Self { cause }
    }

    /// The message shown to the user.
    pub fn message(&self) -> &'static str {
        LOOKUP_FAILED_MESSAGE
    }

    /// The underlying cause, for diagnostics only.
    pub fn cause(&self) -> &GatewayError {
        &self.cause
    }

    /// Failure category of the underlying cause.
    pub fn kind(&self) -> GatewayFailureKind {
        categorize_gateway_error(&self.cause)
    }
}

impl From<GatewayError> for LookupError {
    fn from(cause: GatewayError) -> Self {
        Self::new(cause)
    }
}

/// Submitted text is not a plausible IPv4/IPv6 literal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", INVALID_ADDRESS_MESSAGE)]
pub struct ValidationError {
    /// The rejected input
    pub input: String,
}

impl ValidationError {
    /// The message shown to the user.
    pub fn message(&self) -> &'static str {
        INVALID_ADDRESS_MESSAGE
    }
}
