// src/config/mod.rs
// Configuration: environment (credentials, endpoint) and config file (policy)

pub mod env;
pub mod file;

pub use env::{BackendConfig, ConfigValidation, EnvConfig, ExtractorKind, PLACEHOLDER_API_KEY};
pub use file::ClassroomConfig;
