use serde::{Serialize, Deserialize};
use std::path::Path;

use crate::core::error::{ProgressError, Result};

/// Default name of the suite wrapping a whole run.
pub const DEFAULT_ROOT_SUITE: &str = "jtreg";
/// Written in place of a failed test's output when the file cannot be read.
pub const DEFAULT_LOAD_FAILURE_MESSAGE: &str = "Failed to load test results.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReporterConfig {
    pub root_suite: String,
    pub load_failure_message: String,
    pub color: bool,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            root_suite: DEFAULT_ROOT_SUITE.to_string(),
            load_failure_message: DEFAULT_LOAD_FAILURE_MESSAGE.to_string(),
            color: true,
        }
    }
}

impl ReporterConfig {
    /// Load from a `.toml` file, or JSON for any other extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ProgressError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            ProgressError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        if path.extension().and_then(|ext| ext.to_str()) == Some("toml") {
            Self::from_toml(&contents)
        } else {
            Self::from_json(&contents)
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(contents)
            .map_err(|e| ProgressError::ConfigError(format!("Failed to parse TOML config: {}", e)))?;
        config.validate()
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let config = serde_json::from_str::<Self>(contents)
            .map_err(|e| ProgressError::ConfigError(format!("Failed to parse JSON config: {}", e)))?;
        config.validate()
    }

    fn validate(self) -> Result<Self> {
        if self.root_suite.trim().is_empty() {
            return Err(ProgressError::ConfigError("root_suite must not be empty".to_string()));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ReporterConfig::default();
        assert_eq!(config.root_suite, "jtreg");
        assert_eq!(config.load_failure_message, "Failed to load test results.");
        assert!(config.color);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ReporterConfig::from_toml("root_suite = \"tier1\"").unwrap();
        assert_eq!(config.root_suite, "tier1");
        assert_eq!(config.load_failure_message, DEFAULT_LOAD_FAILURE_MESSAGE);
    }

    #[test]
    fn test_json_config() {
        let config = ReporterConfig::from_json(r#"{"color": false}"#).unwrap();
        assert!(!config.color);
        assert_eq!(config.root_suite, DEFAULT_ROOT_SUITE);
    }

    #[test]
    fn test_invalid_configs() {
        assert!(ReporterConfig::from_toml("root_suite = 5").is_err());
        assert!(ReporterConfig::from_toml("root_suite = \"  \"").is_err());
        assert!(ReporterConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "load_failure_message = \"unreadable\"").unwrap();
        let config = ReporterConfig::from_file(file.path()).unwrap();
        assert_eq!(config.load_failure_message, "unreadable");

        assert!(ReporterConfig::from_file(Path::new("/no/such/config.toml")).is_err());
    }
}
