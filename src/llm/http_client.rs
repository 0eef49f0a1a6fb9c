// src/llm/http_client.rs
// HTTP transport for the reasoning backend (single attempt, no retry)

use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::BackendError;

/// Thin wrapper over a configured reqwest client
pub struct LlmHttpClient {
    client: Client,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl LlmHttpClient {
    pub fn new(request_timeout: Duration, connect_timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            request_timeout,
            connect_timeout,
        }
    }

    /// POST a JSON body with Bearer auth and return the response body.
    ///
    /// Transport failures and timeouts surface as `Transport`, non-2xx
    /// replies as `Status`.
    pub async fn post_json(
        &self,
        request_id: &str,
        url: &str,
        api_key: &str,
        body: String,
    ) -> Result<String, BackendError> {
        debug!(request_id = %request_id, url = %url, body_len = body.len(), "POST");

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body: error_body,
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = LlmHttpClient::new(Duration::from_secs(10), Duration::from_secs(5));
        assert_eq!(client.request_timeout, Duration::from_secs(10));
        assert_eq!(client.connect_timeout, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let client = LlmHttpClient::new(Duration::from_millis(500), Duration::from_millis(200));
        let result = client
            .post_json("test", "http://127.0.0.1:1/chat/completions", "key", "{}".into())
            .await;
        assert!(matches!(result, Err(BackendError::Transport(_))));
    }
}
