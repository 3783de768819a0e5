//! Engine configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use crate::observability::{log_event, Event};
use crate::storage::validate_path;

/// Engine configuration, loaded from a JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Root directory of the file-backed store
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Path segments prepended to every read and write path
    #[serde(default)]
    pub namespace: Vec<String>,

    /// Maximum number of results collected by `Query::select`
    #[serde(default)]
    pub select_limit: Option<usize>,

    /// Verify record checksums on read
    #[serde(default = "default_verify_checksums")]
    pub verify_checksums: bool,

    /// Log query and goal read/write events
    #[serde(default)]
    pub log_queries: bool,
}

fn default_data_dir() -> String {
    "./kanrendb-data".to_string()
}

fn default_verify_checksums() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            namespace: Vec::new(),
            select_limit: None,
            verify_checksums: default_verify_checksums(),
            log_queries: false,
        }
    }
}

impl EngineConfig {
    /// Load and validate configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: EngineConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;

        log_event(Event::ConfigLoaded, &[("data_dir", config.data_dir.as_str())]);
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.is_empty() {
            return Err(ConfigError::Invalid("data_dir must not be empty".into()));
        }

        if self.select_limit == Some(0) {
            return Err(ConfigError::Invalid("select_limit must be > 0".into()));
        }

        validate_path(&self.namespace)
            .map_err(|e| ConfigError::Invalid(format!("namespace: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_from_empty_object() {
        let file = write_config("{}");
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(config.verify_checksums);
    }

    #[test]
    fn test_load_all_fields() {
        let file = write_config(
            r#"{
                "data_dir": "/var/lib/kanrendb",
                "namespace": ["app", "goals"],
                "select_limit": 100,
                "verify_checksums": false,
                "log_queries": true
            }"#,
        );

        let config = EngineConfig::load(file.path()).unwrap();

        assert_eq!(config.data_dir, "/var/lib/kanrendb");
        assert_eq!(config.namespace, vec!["app".to_string(), "goals".to_string()]);
        assert_eq!(config.select_limit, Some(100));
        assert!(!config.verify_checksums);
        assert!(config.log_queries);
    }

    #[test]
    fn test_rejects_zero_select_limit() {
        let file = write_config(r#"{"select_limit": 0}"#);
        assert!(matches!(
            EngineConfig::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_bad_namespace() {
        let config = EngineConfig {
            namespace: vec!["..".into()],
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_invalid_json() {
        let file = write_config("{not json");
        assert!(matches!(
            EngineConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = EngineConfig::load(Path::new("/nonexistent/kanrendb.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
