//! # Configuration
//!
//! YAML configuration for codec parameters and logging.
//!
//! ## Configuration Search Path
//!
//! Configuration is loaded from the first file found:
//! 1. Path specified via `RSFEC_CONFIG` environment variable
//! 2. `./rsfec.yaml` (current directory)
//! 3. `~/.config/rsfec/config.yaml` (user config)
//! 4. `/etc/rsfec/config.yaml` (system config)
//!
//! ## Example Configuration
//!
//! ```yaml
//! codec:
//!   parity: 16
//!   verify: true
//!
//! logging:
//!   level: debug
//!   format: json
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FecError, FecResult};
use crate::observe::LogConfig;
use crate::poly::MAX_PARITY;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "RSFEC_CONFIG";

/// Codec parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Parity symbols per codeword (1..=254)
    pub parity: usize,
    /// Re-check syndromes before writing corrections
    pub verify: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            parity: 4,
            verify: false,
        }
    }
}

/// Complete rsfec configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsfecConfig {
    pub codec: CodecConfig,
    pub logging: LogConfig,
}

impl RsfecConfig {
    /// Load configuration from the default search path.
    ///
    /// Returns the defaults if no file is found.
    pub fn load() -> FecResult<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Self::load_from(&path);
            }
            tracing::warn!(path = %path.display(), "{CONFIG_ENV} points at a missing file");
        }

        for path in Self::config_search_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load and validate configuration from a specific file.
    pub fn load_from(path: &Path) -> FecResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FecError::Config(format!("{}: {}", path.display(), e)))?;

        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), parity = config.codec.parity, "loaded config");
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn parse(yaml: &str) -> FecResult<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| FecError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> FecResult<()> {
        let content = serde_yaml::to_string(self).map_err(|e| FecError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| FecError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Candidate files, highest priority first (excluding `RSFEC_CONFIG`).
    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./rsfec.yaml")];

        if let Some(dirs) = directories::ProjectDirs::from("", "", "rsfec") {
            paths.push(dirs.config_dir().join("config.yaml"));
        }

        paths.push(PathBuf::from("/etc/rsfec/config.yaml"));
        paths
    }

    /// Validate the configuration.
    pub fn validate(&self) -> FecResult<()> {
        if !(1..=MAX_PARITY).contains(&self.codec.parity) {
            return Err(FecError::Config(format!(
                "codec.parity must be 1-{MAX_PARITY}, got {}",
                self.codec.parity
            )));
        }
        Ok(())
    }

    /// Generate example configuration YAML.
    pub fn example_yaml() -> String {
        let config = Self {
            codec: CodecConfig {
                parity: 16,
                verify: true,
            },
            ..Default::default()
        };

        serde_yaml::to_string(&config).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::{LogFormat, LogLevel};

    #[test]
    fn test_default_config() {
        let config = RsfecConfig::default();
        assert_eq!(config.codec.parity, 4);
        assert!(!config.codec.verify);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
codec:
  parity: 32
  verify: true

logging:
  level: trace
  format: json
  filter: "rsfec_core=trace"
"#;

        let config = RsfecConfig::parse(yaml).unwrap();
        assert_eq!(config.codec.parity, 32);
        assert!(config.codec.verify);
        assert_eq!(config.logging.level, LogLevel::Trace);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.filter.as_deref(), Some("rsfec_core=trace"));
    }

    #[test]
    fn test_parse_partial_yaml() {
        let config = RsfecConfig::parse("codec:\n  verify: true\n").unwrap();
        assert!(config.codec.verify);
        assert_eq!(config.codec.parity, 4);
        assert_eq!(config.logging, LogConfig::default());
    }

    #[test]
    fn test_validation() {
        for bad in ["codec:\n  parity: 0\n", "codec:\n  parity: 255\n"] {
            assert!(matches!(RsfecConfig::parse(bad), Err(FecError::Config(_))));
        }
        assert!(RsfecConfig::parse("codec:\n  parity: 254\n").is_ok());
        assert!(matches!(
            RsfecConfig::parse("codec: [1, 2"),
            Err(FecError::Config(_))
        ));
    }

    #[test]
    fn test_example_yaml() {
        let yaml = RsfecConfig::example_yaml();
        assert!(yaml.contains("codec:"));
        assert!(yaml.contains("logging:"));
        let parsed = RsfecConfig::parse(&yaml).unwrap();
        assert_eq!(parsed.codec.parity, 16);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rsfec.yaml");

        let mut config = RsfecConfig::default();
        config.codec.parity = 8;
        config.logging.format = LogFormat::Pretty;
        config.save(&path).unwrap();

        assert_eq!(RsfecConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RsfecConfig::load_from(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, FecError::Config(_)));
    }

    #[test]
    fn test_config_search_paths() {
        let paths = RsfecConfig::config_search_paths();
        assert!(paths[0].ends_with("rsfec.yaml"));
        assert!(paths.last().unwrap().starts_with("/etc/rsfec"));
    }
}
