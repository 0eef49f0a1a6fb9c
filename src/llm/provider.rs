// src/llm/provider.rs
// Reasoning client abstraction

use async_trait::async_trait;

use super::types::{GenerationRequest, JsonObject};
use crate::error::BackendError;

/// Given a structured prompt, return a parsed JSON object or fail.
///
/// Implementations make exactly one attempt per call: no retries, no
/// caching. Retry policy belongs to callers.
#[async_trait]
pub trait ReasoningClient: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<JsonObject, BackendError>;

    /// Short label for logs
    fn name(&self) -> &str;
}

/// Inert client used when no credentials are configured
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledClient;

#[async_trait]
impl ReasoningClient for DisabledClient {
    async fn generate(&self, _request: GenerationRequest) -> Result<JsonObject, BackendError> {
        Err(BackendError::NotConfigured)
    }

    fn name(&self) -> &str {
        "disabled"
    }
}
