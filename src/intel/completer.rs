//! Completion service abstraction.
//!
//! The gateway only needs one capability from the upstream service: take a
//! prompt and a response schema, return JSON text plus the citations that
//! grounded it. [`GeminiCompleter`](super::GeminiCompleter) is the HTTP
//! implementation; tests substitute their own.

use async_trait::async_trait;

use crate::error_handling::CompletionError;

use super::schema::Schema;

/// One schema-constrained completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Natural-language instruction
    pub prompt: String,
    /// Structure the response text must follow
    pub schema: Schema,
    /// Whether the service should ground its answer with live web search
    pub web_search: bool,
}

impl CompletionRequest {
    /// A request without web search.
    pub fn new(prompt: impl Into<String>, schema: Schema) -> Self {
        Self {
            prompt: prompt.into(),
            schema,
            web_search: false,
        }
    }

    /// Enables search grounding.
    pub fn with_web_search(mut self) -> Self {
        self.web_search = true;
        self
    }
}

/// A grounding citation as reported by the service. Either half may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Citation {
    /// Page title
    pub title: Option<String>,
    /// Page address
    pub uri: Option<String>,
}

/// Raw completion output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    /// JSON-encoded response text, if the service produced any
    pub text: Option<String>,
    /// Grounding citations in the order the service listed them
    pub citations: Vec<Citation>,
}

/// Capability to run one completion against the upstream service.
#[async_trait]
pub trait Completer: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &str;

    /// Sends one request. Implementations must not retry.
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError>;
}
