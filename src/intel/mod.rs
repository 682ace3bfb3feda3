//! IP intelligence gateway.
//!
//! Turns one IP address into one [`LookupResult`] by asking a
//! search-grounded completion service for a schema-constrained JSON answer.
//! The gateway does no address validation, retrying or caching: every call
//! is exactly one upstream request.

mod completer;
mod gemini;
mod parse;
mod prompt;
pub mod schema;
mod types;

use std::sync::Arc;

use crate::error_handling::{categorize_gateway_error, GatewayError, LookupError, LookupStats};
use crate::utils::sanitize_and_truncate_error_message;

pub use completer::{Citation, Completer, Completion, CompletionRequest};
pub use gemini::GeminiCompleter;
pub use prompt::build_lookup_prompt;
pub use schema::{lookup_response_schema, Schema, SchemaType};
pub use types::{Contacts, Geography, LookupResult, NetworkInfo, Source};

/// Client for the intelligence gateway.
pub struct GatewayClient {
    completer: Arc<dyn Completer>,
    schema: Schema,
    stats: Arc<LookupStats>,
}

impl GatewayClient {
    /// Creates a gateway that sends lookups through `completer`.
    pub fn new(completer: Arc<dyn Completer>) -> Self {
        Self {
            completer,
            schema: lookup_response_schema(),
            stats: Arc::new(LookupStats::new()),
        }
    }

    /// Shares an existing statistics tracker instead of a private one.
    pub fn with_stats(mut self, stats: Arc<LookupStats>) -> Self {
        self.stats = stats;
        self
    }

    /// Success and failure counters for lookups made through this gateway.
    pub fn stats(&self) -> &Arc<LookupStats> {
        &self.stats
    }

    /// Builds the upstream request for `ip`: prompt, schema and web search.
    pub fn build_request(&self, ip: &str) -> CompletionRequest {
        CompletionRequest::new(build_lookup_prompt(ip), self.schema.clone()).with_web_search()
    }

    /// Looks up intelligence for `ip`.
    ///
    /// The caller is expected to have validated the address. On failure the
    /// returned error shows only a generic retry message; the cause is logged
    /// here and kept inside the error.
    pub async fn lookup(&self, ip: &str) -> Result<LookupResult, LookupError> {
        log::info!("Starting intelligence lookup for {}", ip);

        match self.try_lookup(ip).await {
            Ok(result) => {
                self.stats.record_success();
                log::info!(
                    "Intelligence lookup for {} succeeded with {} source(s)",
                    ip,
                    result.sources.len()
                );
                Ok(result)
            }
            Err(cause) => {
                let kind = categorize_gateway_error(&cause);
                self.stats.record_failure(kind);
                log::error!(
                    "Intelligence lookup for {} failed via {} [{}]: {}",
                    ip,
                    self.completer.name(),
                    kind,
                    sanitize_and_truncate_error_message(&cause.to_string())
                );
                Err(LookupError::new(cause))
            }
        }
    }

    async fn try_lookup(&self, ip: &str) -> Result<LookupResult, GatewayError> {
        let request = self.build_request(ip);
        let completion = self.completer.complete(&request).await?;
        parse::build_result(ip, completion, &self.schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::{CompletionError, GatewayFailureKind};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Scripted {
        reply: Mutex<Option<Result<Completion, CompletionError>>>,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl Scripted {
        fn new(reply: Result<Completion, CompletionError>) -> Arc<Self> {
            Arc::new(Self {
                reply: Mutex::new(Some(reply)),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Completer for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<Completion, CompletionError> {
            self.seen.lock().unwrap().push(request.clone());
            self.reply
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Err(CompletionError::MissingCandidate))
        }
    }

    const BODY: &str = r#"{"summary":"Linode block.","networkInfo":{"organization":"Akamai"},"geography":{"country":"US"},"contacts":{}}"#;

    #[tokio::test]
    async fn test_lookup_sends_schema_constrained_grounded_request() {
        let completer = Scripted::new(Ok(Completion {
            text: Some(BODY.to_string()),
            citations: vec![],
        }));
        let gateway = GatewayClient::new(completer.clone());

        let result = gateway.lookup("23.90.66.53").await.unwrap();
        assert_eq!(result.ip, "23.90.66.53");
        assert_eq!(result.network_info.organization.as_deref(), Some("Akamai"));

        let seen = completer.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].web_search);
        assert!(seen[0].prompt.contains("23.90.66.53"));
        assert_eq!(seen[0].schema, lookup_response_schema());
        assert_eq!(gateway.stats().successes(), 1);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_generic_and_counted() {
        let completer = Scripted::new(Err(CompletionError::Status {
            status: 400,
            body: "API key not valid. Please pass a valid API key.".into(),
        }));
        let gateway = GatewayClient::new(completer);

        let err = gateway.lookup("8.8.8.8").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch IP information. Please try again.");
        assert!(!err.to_string().contains("API key"));
        assert_eq!(err.kind(), GatewayFailureKind::HttpStatus);
        assert_eq!(
            gateway.stats().failure_count(GatewayFailureKind::HttpStatus),
            1
        );
    }

    #[tokio::test]
    async fn test_malformed_body_fails_lookup() {
        let completer = Scripted::new(Ok(Completion {
            text: Some("{\"summary\": ".to_string()),
            citations: vec![Citation::default()],
        }));
        let gateway = GatewayClient::new(completer);

        let err = gateway.lookup("8.8.8.8").await.unwrap_err();
        assert_eq!(err.kind(), GatewayFailureKind::MalformedJson);
    }

    #[tokio::test]
    async fn test_shared_stats_see_gateway_lookups() {
        let stats = Arc::new(LookupStats::new());
        let completer = Scripted::new(Ok(Completion {
            text: Some(BODY.to_string()),
            citations: vec![],
        }));
        let gateway = GatewayClient::new(completer).with_stats(Arc::clone(&stats));

        gateway.lookup("8.8.8.8").await.unwrap();
        gateway.lookup("8.8.8.8").await.unwrap_err();

        assert_eq!(stats.successes(), 1);
        assert_eq!(stats.failure_count(GatewayFailureKind::MissingCandidate), 1);
        assert_eq!(stats.total_failures(), 1);
    }
}
