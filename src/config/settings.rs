//! Application configuration loading and validation.
//!
//! Provides the [`Settings`] struct that aggregates database, cache and
//! logging settings. Configuration is read from an optional TOML file, with
//! environment variable overrides for connection credentials.
//!
//! # Example
//!
//! ```no_run
//! use argdb::config::Settings;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::load("argdb.toml")?;
//!     settings.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::cache::CacheSettings;
use super::database::DatabaseSettings;
use super::logging::LoggingConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Connection and pool settings.
    #[serde(default)]
    pub database: DatabaseSettings,

    /// Split query cache.
    #[serde(default)]
    pub cache: CacheSettings,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Settings {
    /// Parse configuration from TOML content.
    ///
    /// Environment overrides are not applied here; see [`Settings::load`].
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a TOML file and apply environment overrides.
    ///
    /// A missing file is not an error: defaults are used so that a bare
    /// `DATABASE_URL` is enough to connect.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, is malformed,
    /// or fails validation.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut settings = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
            Self::parse_toml(&content)?
        } else {
            Self::default()
        };
        settings.database.apply_env();
        Ok(settings)
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        self.database.validate()?;

        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "logging.format",
                    reason: format!("expected \"pretty\" or \"json\", got \"{other}\""),
                }
                .into());
            }
        }

        if self.cache.enabled && self.cache.dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField { field: "cache.dir" }.into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_document_uses_defaults() {
        let settings = Settings::parse_toml("").unwrap();
        assert_eq!(settings.database.host, "argumentmining.ddns.net");
        assert_eq!(settings.database.port, 3306);
        assert_eq!(settings.database.name, "argument-mining");
        assert_eq!(settings.database.pool_size, 5);
        assert!(settings.database.pre_ping);
        assert!(settings.cache.enabled);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn parses_all_sections() {
        let toml = r#"
[database]
url = "sqlite://argdb.db"
pool_size = 2
connect_timeout_secs = 5
pre_ping = false

[cache]
enabled = false
dir = "/tmp/argdb-cache"

[logging]
level = "debug"
format = "json"
"#;
        let settings = Settings::parse_toml(toml).unwrap();
        assert_eq!(settings.database.url.as_deref(), Some("sqlite://argdb.db"));
        assert_eq!(settings.database.pool_size, 2);
        assert!(!settings.database.pre_ping);
        assert!(!settings.cache.enabled);
        assert_eq!(settings.cache.dir, Path::new("/tmp/argdb-cache"));
        assert_eq!(settings.logging.format, "json");
    }

    #[test]
    fn rejects_unknown_log_format() {
        let result = Settings::parse_toml("[logging]\nformat = \"xml\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "logging.format",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        let result = Settings::parse_toml("[database\nurl = ");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn rejects_zero_timeout() {
        let result = Settings::parse_toml("[database]\nconnect_timeout_secs = 0\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "connect_timeout_secs",
                ..
            }))
        ));
    }
}
