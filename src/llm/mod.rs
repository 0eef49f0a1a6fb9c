// src/llm/mod.rs
// Reasoning client: structured prompt in, JSON object out

mod factory;
mod http_client;
mod logging;
mod openai;
mod provider;
mod types;

pub use factory::client_from_config;
pub use http_client::LlmHttpClient;
pub use openai::{OpenAiCompatClient, parse_completion};
pub use provider::{DisabledClient, ReasoningClient};
pub use types::{GenerationRequest, JsonObject, Message, Role};
