//! Gemini `generateContent` completion backend.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{Config, API_KEY_HEADER};
use crate::error_handling::CompletionError;
use crate::utils::sanitize_and_truncate_error_message;

use super::completer::{Citation, Completer, Completion, CompletionRequest};
use super::schema::Schema;

const RESPONSE_MIME_TYPE: &str = "application/json";

/// Completion backend speaking the Gemini REST API.
pub struct GeminiCompleter {
    client: Arc<Client>,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiCompleter {
    /// Creates a backend from explicit settings.
    pub fn new(
        client: Arc<Client>,
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Creates a backend from application configuration.
    pub fn from_config(client: Arc<Client>, config: &Config) -> Self {
        Self::new(
            client,
            config.api_base.clone(),
            config.api_key.clone(),
            config.model.clone(),
        )
    }

    /// Configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full URL of the `generateContent` method for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Schema,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_request(request: &'a CompletionRequest) -> Self {
        let tools = if request.web_search {
            vec![Tool {
                google_search: GoogleSearch {},
            }]
        } else {
            Vec::new()
        };

        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            tools,
            generation_config: GenerationConfig {
                response_mime_type: RESPONSE_MIME_TYPE,
                response_schema: &request.schema,
            },
        }
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
    // Thinking models may return reasoning parts alongside the answer.
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Deserialize)]
struct WebChunk {
    title: Option<String>,
    uri: Option<String>,
}

impl GenerateContentResponse {
    fn into_completion(self) -> Result<Completion, CompletionError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or(CompletionError::MissingCandidate)?;

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text)
            .collect();

        let citations = candidate
            .grounding_metadata
            .map(|m| m.grounding_chunks)
            .unwrap_or_default()
            .into_iter()
            .map(|chunk| match chunk.web {
                Some(web) => Citation {
                    title: web.title,
                    uri: web.uri,
                },
                None => Citation::default(),
            })
            .collect();

        Ok(Completion {
            text: if text.is_empty() { None } else { Some(text) },
            citations,
        })
    }
}

#[async_trait]
impl Completer for GeminiCompleter {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        let body = GenerateContentRequest::from_request(request);

        log::debug!(
            "Sending generateContent request (model: {}, web_search: {})",
            self.model,
            request.web_search
        );

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body: sanitize_and_truncate_error_message(&raw),
            });
        }

        let envelope: GenerateContentResponse =
            serde_json::from_str(&raw).map_err(CompletionError::Decode)?;
        let completion = envelope.into_completion()?;

        log::debug!(
            "generateContent returned {} bytes of text and {} citation(s)",
            completion.text.as_ref().map(String::len).unwrap_or(0),
            completion.citations.len()
        );

        Ok(completion)
    }
}
