// tests/common/mod.rs
// Shared helpers: a scripted reasoning client and roster fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use classroom::BackendError;
use classroom::llm::{GenerationRequest, JsonObject, ReasoningClient};
use classroom::simulation::Student;

/// Replays queued replies in order and records every request it sees.
/// Running out of replies behaves like an unreachable backend.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<JsonObject, BackendError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn replying(values: Vec<Value>) -> Arc<Self> {
        let client = Self::new();
        for value in values {
            client.push_json(value);
        }
        client
    }

    pub fn failing() -> Arc<Self> {
        let client = Self::new();
        client.push_error(BackendError::Status {
            status: 503,
            body: "overloaded".into(),
        });
        client
    }

    /// Queue a reply; non-object values are queued as `NotAnObject`
    pub fn push_json(&self, value: Value) {
        let reply = match value {
            Value::Object(object) => Ok(object),
            _ => Err(BackendError::NotAnObject),
        };
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn push_error(&self, error: BackendError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The user payload of the n-th request, parsed back to JSON
    pub fn payload(&self, index: usize) -> Value {
        let requests = self.requests.lock().unwrap();
        let payload = requests[index].user_payload().unwrap_or_default();
        serde_json::from_str(payload).unwrap()
    }

    pub fn system_prompt(&self, index: usize) -> String {
        let requests = self.requests.lock().unwrap();
        requests[index].system_prompt().unwrap_or_default().to_string()
    }
}

#[async_trait]
impl ReasoningClient for ScriptedClient {
    async fn generate(&self, request: GenerationRequest) -> Result<JsonObject, BackendError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(BackendError::NotConfigured))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub fn student(id: &str, understanding: u8) -> Student {
    Student::new(
        id,
        format!("Student {}", id),
        "Learns by example",
        "Thinks heavier objects fall faster",
        "🧪",
        understanding,
    )
}

/// Three students with ids "1", "2", "3"
pub fn roster(scores: [u8; 3]) -> Vec<Student> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| student(&(i + 1).to_string(), score))
        .collect()
}
