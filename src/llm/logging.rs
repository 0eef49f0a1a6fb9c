// src/llm/logging.rs
// Shared logging helpers for reasoning calls

use tracing::{info, warn};

use crate::error::BackendError;

/// Log completion summary for a backend call. `content_len` is the
/// character length of the returned message content.
pub fn log_completion(request_id: &str, provider: &str, duration_ms: u64, content_len: usize) {
    info!(
        request_id = %request_id,
        duration_ms = duration_ms,
        content_len = content_len,
        "{} generation complete", provider
    );
}

/// Log a failed backend call.
pub fn log_failure(request_id: &str, provider: &str, duration_ms: u64, err: &BackendError) {
    warn!(
        request_id = %request_id,
        duration_ms = duration_ms,
        error = %err,
        "{} generation failed", provider
    );
}
