//! Failure categorization.
//!
//! Maps gateway failures onto a small fixed set of categories so that log
//! lines and session statistics stay comparable across runs.

use strum_macros::EnumIter as EnumIterMacro;

use super::types::{CompletionError, GatewayError};

/// Category of a failed intelligence lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum GatewayFailureKind {
    // Transport
    /// The request timed out
    TransportTimeout,
    /// No connection could be made
    TransportConnect,
    /// The request could not be built
    TransportBuilder,
    /// Any other transport failure
    TransportOther,
    // Upstream
    /// The service answered with a non-success status
    HttpStatus,
    /// The response envelope was not the expected JSON
    EnvelopeDecode,
    /// The envelope held no candidate
    MissingCandidate,
    // Payload
    /// The completion text was empty
    EmptyResponse,
    /// The completion text was not JSON
    MalformedJson,
    /// The completion JSON did not match the schema
    SchemaMismatch,
}

impl std::fmt::Display for GatewayFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GatewayFailureKind {
    /// Stable snake_case name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayFailureKind::TransportTimeout => "transport_timeout",
            GatewayFailureKind::TransportConnect => "transport_connect",
            GatewayFailureKind::TransportBuilder => "transport_builder",
            GatewayFailureKind::TransportOther => "transport",
            GatewayFailureKind::HttpStatus => "http_status",
            GatewayFailureKind::EnvelopeDecode => "envelope_decode",
            GatewayFailureKind::MissingCandidate => "missing_candidate",
            GatewayFailureKind::EmptyResponse => "empty_response",
            GatewayFailureKind::MalformedJson => "malformed_json",
            GatewayFailureKind::SchemaMismatch => "schema_mismatch",
        }
    }
}

/// Categorizes a `reqwest::Error` raised while talking to the completion service.
///
/// Status errors are not expected here: the completer checks the status
/// itself and reports [`CompletionError::Status`].
pub fn categorize_reqwest_error(error: &reqwest::Error) -> GatewayFailureKind {
    if error.is_status() {
        GatewayFailureKind::HttpStatus
    } else if error.is_builder() {
        GatewayFailureKind::TransportBuilder
    } else if error.is_timeout() {
        GatewayFailureKind::TransportTimeout
    } else if error.is_connect() {
        GatewayFailureKind::TransportConnect
    } else if error.is_decode() {
        GatewayFailureKind::EnvelopeDecode
    } else {
        GatewayFailureKind::TransportOther
    }
}

/// Categorizes a gateway failure for logging and statistics.
pub fn categorize_gateway_error(error: &GatewayError) -> GatewayFailureKind {
    match error {
        GatewayError::Completion(CompletionError::Http(e)) => categorize_reqwest_error(e),
        GatewayError::Completion(CompletionError::Status { .. }) => GatewayFailureKind::HttpStatus,
        GatewayError::Completion(CompletionError::Decode(_)) => GatewayFailureKind::EnvelopeDecode,
        GatewayError::Completion(CompletionError::MissingCandidate) => {
            GatewayFailureKind::MissingCandidate
        }
        GatewayError::EmptyResponse => GatewayFailureKind::EmptyResponse,
        GatewayError::MalformedJson(_) => GatewayFailureKind::MalformedJson,
        GatewayError::SchemaMismatch(_) => GatewayFailureKind::SchemaMismatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn test_all_failure_kinds_have_unique_string_representation() {
        let mut seen = HashSet::new();
        for kind in GatewayFailureKind::iter() {
            let s = kind.as_str();
            assert!(!s.is_empty(), "{:?} should have a label", kind);
            assert!(seen.insert(s), "duplicate label {}", s);
            assert_eq!(kind.to_string(), s);
        }
    }

    #[test]
    fn test_categorize_payload_errors() {
        let malformed = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert_eq!(
            categorize_gateway_error(&GatewayError::MalformedJson(malformed)),
            GatewayFailureKind::MalformedJson
        );
        assert_eq!(
            categorize_gateway_error(&GatewayError::EmptyResponse),
            GatewayFailureKind::EmptyResponse
        );
        assert_eq!(
            categorize_gateway_error(&GatewayError::SchemaMismatch("x".into())),
            GatewayFailureKind::SchemaMismatch
        );
    }

    #[test]
    fn test_categorize_upstream_errors() {
        assert_eq!(
            categorize_gateway_error(&GatewayError::Completion(CompletionError::Status {
                status: 500,
                body: String::new(),
            })),
            GatewayFailureKind::HttpStatus
        );
        assert_eq!(
            categorize_gateway_error(&GatewayError::Completion(
                CompletionError::MissingCandidate
            )),
            GatewayFailureKind::MissingCandidate
        );
    }

    // Transport categorization needs real reqwest::Error values; it is
    // exercised against a closed port in tests/gateway_http.rs.
}
