// src/llm/factory.rs
// Builds the reasoning client from startup configuration

use std::sync::Arc;
use tracing::info;

use super::openai::OpenAiCompatClient;
use super::provider::{DisabledClient, ReasoningClient};
use crate::config::BackendConfig;

/// Pick a live client when credentials exist, the inert one otherwise
pub fn client_from_config(config: &BackendConfig) -> Arc<dyn ReasoningClient> {
    if config.is_configured() {
        info!(model = %config.model, base_url = %config.base_url, "Using OpenAI-compatible reasoning backend");
        Arc::new(OpenAiCompatClient::new(config.clone()))
    } else {
        info!("Reasoning backend disabled, running in degraded mode");
        Arc::new(DisabledClient)
    }
}
