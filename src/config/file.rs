// src/config/file.rs
// File-based configuration from ~/.classroom/config.toml

use crate::simulation::SimulationPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Top-level config structure
#[derive(Debug, Deserialize, Default)]
pub struct ClassroomConfig {
    #[serde(default)]
    pub simulation: SimulationSection,
}

/// `[simulation]` table; every key is optional
#[derive(Debug, Deserialize, Default)]
pub struct SimulationSection {
    pub roster_size: Option<usize>,
    pub speaker_cap: Option<usize>,
    pub require_preamble: Option<bool>,
    pub min_notes_chars: Option<usize>,
    pub notes_char_limit: Option<usize>,
    pub fallback_increment: Option<u8>,
    pub initial_understanding_max: Option<u8>,
}

impl ClassroomConfig {
    /// Load config from ~/.classroom/config.toml
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded config from file");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse config file");
                    Self::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
        }
    }

    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".classroom")
            .join("config.toml")
    }

    /// Overlay the file's settings onto a base policy
    pub fn apply_to(&self, base: SimulationPolicy) -> SimulationPolicy {
        let s = &self.simulation;
        SimulationPolicy {
            roster_size: s.roster_size.unwrap_or(base.roster_size),
            speaker_cap: s.speaker_cap.unwrap_or(base.speaker_cap),
            require_preamble: s.require_preamble.unwrap_or(base.require_preamble),
            min_notes_chars: s.min_notes_chars.unwrap_or(base.min_notes_chars),
            notes_char_limit: s.notes_char_limit.unwrap_or(base.notes_char_limit),
            fallback_increment: s.fallback_increment.unwrap_or(base.fallback_increment),
            initial_understanding_max: s
                .initial_understanding_max
                .unwrap_or(base.initial_understanding_max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_config() {
        let toml = r#"
[simulation]
speaker_cap = 2
require_preamble = false
"#;
        let config: ClassroomConfig = toml::from_str(toml).unwrap();
        let policy = config.apply_to(SimulationPolicy::default());
        assert_eq!(policy.speaker_cap, 2);
        assert!(!policy.require_preamble);
        assert_eq!(policy.roster_size, SimulationPolicy::default().roster_size);
    }

    #[test]
    fn test_parse_empty_config() {
        let config: ClassroomConfig = toml::from_str("").unwrap();
        let policy = config.apply_to(SimulationPolicy::default());
        assert_eq!(policy, SimulationPolicy::default());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClassroomConfig::load_from(&dir.path().join("nope.toml"));
        assert!(config.simulation.speaker_cap.is_none());
    }

    #[test]
    fn test_load_garbage_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[simulation\nspeaker_cap = ").unwrap();
        let config = ClassroomConfig::load_from(file.path());
        assert!(config.simulation.speaker_cap.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[simulation]\nroster_size = 3\nfallback_increment = 5").unwrap();
        let config = ClassroomConfig::load_from(file.path());
        let policy = config.apply_to(SimulationPolicy::default());
        assert_eq!(policy.roster_size, 3);
        assert_eq!(policy.fallback_increment, 5);
    }
}
