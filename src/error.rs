// src/error.rs
// Error types for the classroom simulation

use thiserror::Error;

/// Failures of the reasoning backend call itself.
///
/// Every variant is recoverable from the simulation's point of view: the
/// Initializer and Turn Evaluator convert them into fallback results.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("reasoning backend not configured")]
    NotConfigured,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response has no textual payload")]
    MissingPayload,

    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("payload is JSON but not an object")]
    NotAnObject,
}

/// Main error type for the classroom library
#[derive(Error, Debug)]
pub enum ClassroomError {
    #[error("extraction error: {0}")]
    Extraction(String),

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

/// Convenience type alias for Result using ClassroomError
pub type Result<T> = std::result::Result<T, ClassroomError>;

impl ClassroomError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        ClassroomError::Validation(msg.into())
    }

    /// True for the errors the simulation absorbs into a fallback result
    pub fn is_degradable(&self) -> bool {
        matches!(self, ClassroomError::Backend(_) | ClassroomError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_status_display() {
        let err = BackendError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "API error 502: bad gateway");
    }

    #[test]
    fn test_backend_wraps_into_classroom_error() {
        let err: ClassroomError = BackendError::MissingPayload.into();
        assert!(matches!(err, ClassroomError::Backend(BackendError::MissingPayload)));
        assert!(err.to_string().contains("textual payload"));
    }

    #[test]
    fn test_from_invalid_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: BackendError = json_err.into();
        assert!(matches!(err, BackendError::InvalidJson(_)));
    }

    #[test]
    fn test_validation_error() {
        let err = ClassroomError::validation("missing field `students`");
        assert!(err.to_string().contains("validation error"));
        assert!(err.to_string().contains("students"));
    }

    #[test]
    fn test_degradable_kinds() {
        assert!(ClassroomError::Backend(BackendError::NotConfigured).is_degradable());
        assert!(ClassroomError::validation("x").is_degradable());
        assert!(!ClassroomError::Extraction("bad pdf".into()).is_degradable());
        assert!(!ClassroomError::Config("x".into()).is_degradable());
    }
}
