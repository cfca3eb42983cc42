//! Portal configuration
//!
//! Loaded from an optional TOML file layered with `RELEASE_PORTAL__*`
//! environment variables, e.g. `RELEASE_PORTAL__SERVER__PORT=9000`.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use release_portal_domain::signoff::NotificationSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File or environment could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Values parsed but are not usable
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

const ENV_PREFIX: &str = "RELEASE_PORTAL";

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// `host:port` for the listener
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level: trace, debug, info, warn or error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed maximum level
    pub fn max_level(&self) -> Result<Level> {
        Level::from_str(self.level.trim())
            .map_err(|_| ConfigError::Validation(format!("Unknown log level '{}'", self.level)))
    }
}

/// Top-level portal configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// HTTP listener
    pub server: ServerConfig,
    /// Logging
    pub logging: LoggingConfig,
    /// Approval notification addresses
    pub notification: NotificationSettings,
}

impl PortalConfig {
    /// Default config file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("release-portal")
            .join("config.toml")
    }

    /// Load from `path` (or the default location), then the environment.
    ///
    /// A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);

        let loaded: PortalConfig = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Check values the listener and notifier depend on
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("Server port must be greater than 0".to_string()));
        }
        self.logging.max_level()?;

        let notification = &self.notification;
        if !notification.release_manager.contains('@') {
            return Err(ConfigError::Validation(format!(
                "Release manager address '{}' is not an email address",
                notification.release_manager
            )));
        }
        if notification.email_domain.trim().is_empty() {
            return Err(ConfigError::Validation("Email domain must not be empty".to_string()));
        }
        if notification.owner_separator.is_empty() {
            return Err(ConfigError::Validation("Owner separator must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_are_valid() {
        let config = PortalConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.socket_addr(), "0.0.0.0:8080");
        assert_eq!(config.logging.max_level().unwrap(), Level::INFO);
        assert_eq!(config.notification.owner_separator, ".");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PortalConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[server]
port = 9090

[notification]
release_manager = "rm@corp.test"
email_domain = "corp.test"
"#,
        )
        .unwrap();

        let config = PortalConfig::load(Some(&path)).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.notification.release_manager, "rm@corp.test");
        assert_eq!(config.notification.email_domain, "corp.test");
        assert_eq!(config.notification.owner_separator, ".");
    }

    #[test]
    fn test_invalid_release_manager_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[notification]\nrelease_manager = \"nobody\"\n").unwrap();

        let err = PortalConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_validation_rejects_zero_port_and_bad_level() {
        let mut config = PortalConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = PortalConfig::default();
        config.logging.level = "chatty".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\nport = ").unwrap();

        assert!(matches!(PortalConfig::load(Some(&path)), Err(ConfigError::Parse(_))));
    }
}
