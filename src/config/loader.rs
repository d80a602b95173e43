// src/config/loader.rs
//! Configuration loader with validation.

use crate::config::AnalysisConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// The file is not valid TOML for an [`AnalysisConfig`].
    #[error("configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The parsed configuration failed [`AnalysisConfig::validate`].
    #[error("configuration validation failed:{}", .0.iter().map(|e| format!("\n  {}", e)).collect::<String>())]
    Validation(Vec<String>),

    /// The file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Loads and validates an [`AnalysisConfig`] from a TOML file.
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load, parse, and validate the configuration file.
    pub fn load(&self) -> Result<AnalysisConfig, ConfigError> {
        if !self.path.exists() {
            return Err(ConfigError::FileNotFound(
                self.path.display().to_string(),
            ));
        }
        let content = std::fs::read_to_string(&self.path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn parse(content: &str) -> Result<AnalysisConfig, ConfigError> {
        let config: AnalysisConfig = toml::from_str(content)?;
        config.validate().map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_minimal() {
        let config = ConfigLoader::parse("").unwrap();
        assert_eq!(config.n_channels, 16);
    }

    #[test]
    fn test_parse_overrides() {
        let config = ConfigLoader::parse(
            r#"
            n_channels = 64
            threshold_hi = 50.0
            noise_range_sampling = 1
            verbose = true
            producer_name = "daq_sim"
            "#,
        )
        .unwrap();

        assert_eq!(config.n_channels, 64);
        assert_eq!(config.threshold_hi, 50.0);
        assert!(config.verbose);
        assert_eq!(config.producer_name, "daq_sim");
    }

    #[test]
    fn test_parse_rejects_invalid() {
        let err = ConfigLoader::parse("n_channels = 0").unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert!(errors[0].contains("n_channels"));
            }
            other => panic!("expected validation error, got {}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "n_channels = 8\nstatic_input_size = 1024").unwrap();

        let config = ConfigLoader::new(file.path()).load().unwrap();
        assert_eq!(config.n_channels, 8);
        assert_eq!(config.static_input_size(), Some(1024));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConfigLoader::new("/nonexistent/analysis.toml").load().unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
