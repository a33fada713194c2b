use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::IdPolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Runtime settings, read from an optional JSON file.
///
/// Every field may be omitted:
///
/// ```json
/// { "load_delay_ms": 400, "tick_rate_ms": 100, "id_policy": "monotonic" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// How long the sample data takes to arrive after startup
    pub load_delay_ms: u64,
    /// Redraw interval while idle; drives the loading spinner
    pub tick_rate_ms: u64,
    pub id_policy: IdPolicy,
    /// Log destination; the terminal itself is taken by the UI
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            load_delay_ms: 400,
            tick_rate_ms: 100,
            id_policy: IdPolicy::default(),
            log_file: None,
        }
    }
}

impl Config {
    /// Reads and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Parse`] for malformed JSON or unknown fields, and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file when a path is given, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Config::default()),
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `tick_rate_ms` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid("tick_rate_ms must be greater than 0".to_string()));
        }
        Ok(())
    }

    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("ttodo.log"))
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
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.load_delay(), Duration::from_millis(400));
        assert_eq!(config.tick_rate(), Duration::from_millis(100));
        assert_eq!(config.id_policy, IdPolicy::FollowLast);
        assert!(config.log_file().ends_with("ttodo.log"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let file = write_config(r#"{ "id_policy": "monotonic", "load_delay_ms": 0 }"#);
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.id_policy, IdPolicy::Monotonic);
        assert_eq!(config.load_delay_ms, 0);
        assert_eq!(config.tick_rate_ms, 100);
    }

    #[test]
    fn test_load_log_file() {
        let file = write_config(r#"{ "log_file": "/var/tmp/todo.log" }"#);
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.log_file(), PathBuf::from("/var/tmp/todo.log"));
    }

    #[test]
    fn test_load_rejects_unknown_field() {
        let file = write_config(r#"{ "persist": true }"#);
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_rejects_zero_tick_rate() {
        let file = write_config(r#"{ "tick_rate_ms": 0 }"#);
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_load_or_default_without_path() {
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }
}
