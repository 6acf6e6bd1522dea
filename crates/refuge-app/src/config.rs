//! Application configuration
//!
//! Loaded from an optional YAML file. Every section and key has a default,
//! so an empty file (or no file) yields a runnable configuration:
//!
//! ```yaml
//! server:
//!   bind: 0.0.0.0:8080
//! database:
//!   path: refuge.db        # ":memory:" for a throwaway database
//! robot_feed:
//!   url: https://robotstakeover20210903110417.azurewebsites.net/robotcpu
//!   timeout_secs: 10
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use refuge_adapter::gateway::DEFAULT_ROBOT_FEED_URL;

/// Database path that selects an in-memory SQLite database
pub const IN_MEMORY_DATABASE: &str = ":memory:";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub robot_feed: RobotFeedConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "refuge.db".to_string(),
        }
    }
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY_DATABASE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RobotFeedConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for RobotFeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ROBOT_FEED_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl RobotFeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Values given on the command line. `None` keeps the file value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind: Option<String>,
    pub database: Option<String>,
    pub robot_feed_url: Option<String>,
}

impl AppConfig {
    /// Parse a YAML document.
    pub fn from_yaml(yaml: &str, path: &Path) -> Result<Self, ConfigError> {
        // serde_yaml reads an empty document as unit, not as an empty map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content, path)
    }

    /// Load from `path` if given, otherwise start from defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(bind) = overrides.bind {
            self.server.bind = bind;
        }
        if let Some(path) = overrides.database {
            self.database.path = path;
        }
        if let Some(url) = overrides.robot_feed_url {
            self.robot_feed.url = url;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind.trim().is_empty() {
            return Err(ConfigError::Invalid("server.bind is empty".to_string()));
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::Invalid("database.path is empty".to_string()));
        }
        if self.robot_feed.url.trim().is_empty() {
            return Err(ConfigError::Invalid("robot_feed.url is empty".to_string()));
        }
        if self.robot_feed.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "robot_feed.timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.database.path, "refuge.db");
        assert!(!config.database.is_in_memory());
        assert_eq!(config.robot_feed.url, DEFAULT_ROBOT_FEED_URL);
        assert_eq!(config.robot_feed.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let yaml = "database:\n  path: \":memory:\"\nrobot_feed:\n  timeout_secs: 3\n";

        let config = AppConfig::from_yaml(yaml, Path::new("refuge.yaml")).unwrap();

        assert!(config.database.is_in_memory());
        assert_eq!(config.robot_feed.timeout_secs, 3);
        assert_eq!(config.robot_feed.url, DEFAULT_ROBOT_FEED_URL);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_empty_file() {
        let config = AppConfig::from_yaml("", Path::new("refuge.yaml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  bind: 127.0.0.1:9000").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();

        assert_eq!(config.server.bind, "127.0.0.1:9000");
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::from_file(Path::new("/nonexistent/refuge.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let err = AppConfig::from_yaml("server: [1, 2", Path::new("bad.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides_win() {
        let yaml = "server:\n  bind: 127.0.0.1:9000\ndatabase:\n  path: file.db\n";
        let config = AppConfig::from_yaml(yaml, Path::new("refuge.yaml"))
            .unwrap()
            .apply(Overrides {
                bind: Some("127.0.0.1:7000".to_string()),
                database: None,
                robot_feed_url: Some("http://localhost:1/robots".to_string()),
            });

        assert_eq!(config.server.bind, "127.0.0.1:7000");
        assert_eq!(config.database.path, "file.db");
        assert_eq!(config.robot_feed.url, "http://localhost:1/robots");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = AppConfig::default();
        config.robot_feed.timeout_secs = 0;

        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
