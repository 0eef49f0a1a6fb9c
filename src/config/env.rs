// src/config/env.rs
// Environment-based configuration - resolved once at startup

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{ClassroomError, Result};

/// Placeholder key used when no credentials are configured.
/// A client holding it never touches the network.
pub const PLACEHOLDER_API_KEY: &str = "mock-key";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Static configuration for the reasoning backend
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Bearer token (OPENAI_API_KEY), or the placeholder
    pub api_key: String,
    /// API root (OPENAI_BASE_URL)
    pub base_url: String,
    /// Model name (CLASSROOM_MODEL)
    pub model: String,
    /// Whole-request timeout (CLASSROOM_TIMEOUT_SECS)
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_key: PLACEHOLDER_API_KEY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
        }
    }
}

impl BackendConfig {
    /// Load from environment variables.
    ///
    /// Set `CLASSROOM_DISABLE_LLM=1` to force the placeholder key (fully
    /// degraded mode).
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_key = if parse_bool_env("CLASSROOM_DISABLE_LLM").unwrap_or(false) {
            info!("CLASSROOM_DISABLE_LLM is set, reasoning backend disabled");
            defaults.api_key
        } else {
            read_var("OPENAI_API_KEY").unwrap_or(defaults.api_key)
        };

        let request_timeout = read_var("CLASSROOM_TIMEOUT_SECS")
            .and_then(|s| match s.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    warn!(value = %s, "Invalid CLASSROOM_TIMEOUT_SECS, using default");
                    None
                }
            })
            .unwrap_or(defaults.request_timeout);

        let config = Self {
            api_key,
            base_url: read_var("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            model: read_var("CLASSROOM_MODEL").unwrap_or(defaults.model),
            request_timeout,
            connect_timeout: defaults.connect_timeout,
        };

        if config.is_configured() {
            debug!(base_url = %config.base_url, model = %config.model, "Reasoning backend configured");
        } else {
            warn!("No OPENAI_API_KEY configured - every turn will use the fallback policy");
        }
        config
    }

    /// True when real credentials are present
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty() && self.api_key != PLACEHOLDER_API_KEY
    }

    /// Full URL of the chat completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Which text extractor the deployment uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractorKind {
    /// Real extraction for PDF and markdown
    #[default]
    Full,
    /// Plain text only; paginated formats get a "paste text" placeholder
    Placeholder,
}

impl ExtractorKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "full" => Some(Self::Full),
            "placeholder" | "plain" => Some(Self::Placeholder),
            _ => None,
        }
    }
}

/// Configuration validation result
#[derive(Debug, Default)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ConfigValidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Format as a human-readable report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        if !self.errors.is_empty() {
            lines.push("Errors:".to_string());
            for err in &self.errors {
                lines.push(format!("  - {}", err));
            }
        }

        if !self.warnings.is_empty() {
            lines.push("Warnings:".to_string());
            for warn in &self.warnings {
                lines.push(format!("  - {}", warn));
            }
        }

        if lines.is_empty() {
            "Configuration OK".to_string()
        } else {
            lines.join("\n")
        }
    }

    /// Fail with every collected error when the configuration is unusable
    pub fn into_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ClassroomError::Config(self.errors.join("; ")))
        }
    }
}

/// Environment configuration - all env vars in one place
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub backend: BackendConfig,
    /// Text extractor selection (CLASSROOM_EXTRACTOR)
    pub extractor: ExtractorKind,
}

impl EnvConfig {
    /// Load all environment configuration (call once at startup)
    pub fn load() -> Self {
        info!("Loading environment configuration");

        let extractor = read_var("CLASSROOM_EXTRACTOR")
            .and_then(|s| {
                let kind = ExtractorKind::parse(&s);
                if kind.is_none() {
                    warn!(value = %s, "Unknown CLASSROOM_EXTRACTOR, using full extraction");
                }
                kind
            })
            .unwrap_or_default();

        Self {
            backend: BackendConfig::from_env(),
            extractor,
        }
    }

    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();

        if !self.backend.is_configured() {
            validation.add_warning(
                "No OPENAI_API_KEY configured. Sessions will run in fully degraded mode.",
            );
        }

        let base = &self.backend.base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            validation.add_error(format!("OPENAI_BASE_URL '{}' is not an http(s) URL", base));
        }

        if self.backend.model.trim().is_empty() {
            validation.add_error("CLASSROOM_MODEL is empty");
        }

        validation
    }
}

fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool_env(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?.to_lowercase();
    match value.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_backend_is_inert() {
        let config = BackendConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.api_key, PLACEHOLDER_API_KEY);
    }

    #[test]
    fn test_blank_key_is_not_configured() {
        let config = BackendConfig {
            api_key: "   ".to_string(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn test_completions_url_trims_slash() {
        let config = BackendConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.completions_url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_extractor_kind_parse() {
        assert_eq!(ExtractorKind::parse("FULL"), Some(ExtractorKind::Full));
        assert_eq!(ExtractorKind::parse("plain"), Some(ExtractorKind::Placeholder));
        assert_eq!(ExtractorKind::parse("ocr"), None);
    }

    #[test]
    fn test_validation_without_key_only_warns() {
        let config = EnvConfig::default();
        let validation = config.validate();
        assert!(validation.is_valid());
        assert_eq!(validation.warnings.len(), 1);
        assert!(validation.report().contains("Warnings:"));
    }

    #[test]
    fn test_validation_rejects_bad_url() {
        let config = EnvConfig {
            backend: BackendConfig {
                api_key: "sk-test".to_string(),
                base_url: "ftp://example.com".to_string(),
                ..Default::default()
            },
            extractor: ExtractorKind::Full,
        };
        let validation = config.validate();
        assert!(!validation.is_valid());
        assert!(validation.report().contains("Errors:"));

        let err = validation.into_result().unwrap_err();
        assert!(matches!(err, ClassroomError::Config(_)));
        assert!(!err.is_degradable());
    }

    #[test]
    fn test_warnings_alone_pass_into_result() {
        assert!(EnvConfig::default().validate().into_result().is_ok());
    }

    #[test]
    fn test_empty_report_is_ok() {
        assert_eq!(ConfigValidation::new().report(), "Configuration OK");
    }
}
