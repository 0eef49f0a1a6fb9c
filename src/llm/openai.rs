// src/llm/openai.rs
// OpenAI-compatible chat completions client returning JSON objects

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::{Span, debug, instrument};
use uuid::Uuid;

use super::http_client::LlmHttpClient;
use super::logging::{log_completion, log_failure};
use super::provider::ReasoningClient;
use super::types::{GenerationRequest, JsonObject, Message};
use crate::config::BackendConfig;
use crate::error::BackendError;

const PROVIDER: &str = "OpenAI";

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Chat completion request (OpenAI-compatible format)
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ResponseChoice>,
}

#[derive(Debug, Deserialize)]
struct ResponseChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// Reasoning client for any OpenAI-compatible `/chat/completions` endpoint
pub struct OpenAiCompatClient {
    config: BackendConfig,
    http: LlmHttpClient,
}

impl OpenAiCompatClient {
    pub fn new(config: BackendConfig) -> Self {
        let http = LlmHttpClient::new(config.request_timeout, config.connect_timeout);
        Self { config, http }
    }

    fn build_body(&self, request: &GenerationRequest) -> Result<String, BackendError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: &request.messages,
            response_format: request.json_object.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };
        Ok(serde_json::to_string(&body)?)
    }

    /// One chat completion call; the reply must carry a JSON object
    #[instrument(skip(self, request), fields(request_id, model = %self.config.model, message_count = request.messages.len()))]
    pub async fn complete(&self, request: GenerationRequest) -> Result<JsonObject, BackendError> {
        let request_id = Uuid::new_v4().to_string();
        let start_time = Instant::now();
        Span::current().record("request_id", request_id.as_str());

        if !self.config.is_configured() {
            return Err(BackendError::NotConfigured);
        }

        let body = self.build_body(&request)?;
        let result = match self
            .http
            .post_json(&request_id, &self.config.completions_url(), &self.config.api_key, body)
            .await
        {
            Ok(response_body) => completion_payload(&response_body),
            Err(e) => Err(e),
        };

        let duration_ms = start_time.elapsed().as_millis() as u64;
        match result {
            Ok((object, content_len)) => {
                log_completion(&request_id, PROVIDER, duration_ms, content_len);
                Ok(object)
            }
            Err(e) => {
                log_failure(&request_id, PROVIDER, duration_ms, &e);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl ReasoningClient for OpenAiCompatClient {
    async fn generate(&self, request: GenerationRequest) -> Result<JsonObject, BackendError> {
        self.complete(request).await
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

/// Extract the JSON object carried in a chat completion response body
pub fn parse_completion(response_body: &str) -> Result<JsonObject, BackendError> {
    completion_payload(response_body).map(|(object, _)| object)
}

/// The payload object plus the character length of the message content
fn completion_payload(response_body: &str) -> Result<(JsonObject, usize), BackendError> {
    let data: ChatResponse = serde_json::from_str(response_body)?;

    let content = data
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or(BackendError::MissingPayload)?;

    let content_len = content.chars().count();
    debug!(content_len, "Completion payload received");

    match serde_json::from_str::<Value>(strip_code_fence(&content))? {
        Value::Object(object) => Ok((object, content_len)),
        _ => Err(BackendError::NotAnObject),
    }
}

/// Some models wrap JSON mode output in a markdown fence anyway
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
