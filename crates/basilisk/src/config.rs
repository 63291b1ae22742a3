//! # Sandbox Configuration
//!
//! Run parameters loaded once at startup from a TOML file. A missing file
//! falls back to defaults; a malformed file is a hard error.

use serde::Deserialize;
use thiserror::Error;

/// Errors loading a sandbox config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for [`SandboxConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Sandbox run parameters.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SandboxConfig {
    /// Number of entities to spawn.
    pub entities: usize,
    /// Number of simulation ticks to run.
    pub ticks: u32,
    /// Progress report interval, in ticks.
    pub report_every: u32,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            entities: 10_000,
            ticks: 600,
            report_every: 100,
        }
    }
}

impl SandboxConfig {
    /// Loads a config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Loads a config, falling back to defaults when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] only for a file that exists but cannot be
    /// read or parsed — a missing file is not an error.
    pub fn load_or_default(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(toml::from_str(&text)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: SandboxConfig = toml::from_str(
            r#"
            entities = 500
            ticks = 60
            report_every = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.entities, 500);
        assert_eq!(config.ticks, 60);
        assert_eq!(config.report_every, 10);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SandboxConfig = toml::from_str("entities = 42").unwrap();
        assert_eq!(config.entities, 42);
        assert_eq!(config.ticks, SandboxConfig::default().ticks);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result: Result<SandboxConfig, _> = toml::from_str("entitees = 42");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = SandboxConfig::load_or_default("definitely/not/a/real/path.toml").unwrap();
        assert_eq!(config, SandboxConfig::default());
    }
}
