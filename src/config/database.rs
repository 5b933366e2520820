//! Database connection settings.

use serde::Deserialize;
use url::Url;

use crate::error::{ConfigError, Result};

/// Environment variable that overrides every other connection setting.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Environment variable for the database user.
pub const DATABASE_USER_ENV: &str = "ARGDB_DB_USER";
/// Environment variable for the database password.
pub const DATABASE_PASSWORD_ENV: &str = "ARGDB_DB_PASSWORD";

/// Connection settings for the argument-mining database.
///
/// Either `url` is set, or the URL is composed from `host`, `port`, `name`,
/// `user` and `password` as a MySQL URL.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Full connection URL. Takes precedence over the individual fields.
    #[serde(default)]
    pub url: Option<String>,

    /// Database host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Database port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database (schema) name.
    #[serde(default = "default_name")]
    pub name: String,

    /// Database user. Usually supplied through `ARGDB_DB_USER`.
    #[serde(default)]
    pub user: Option<String>,

    /// Database password. Usually supplied through `ARGDB_DB_PASSWORD`.
    #[serde(default)]
    pub password: Option<String>,

    /// Maximum number of pooled connections.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Seconds to wait for a connection before giving up.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Check connections for liveness when they leave the pool.
    #[serde(default = "default_pre_ping")]
    pub pre_ping: bool,
}

fn default_host() -> String {
    "argumentmining.ddns.net".to_string()
}

fn default_port() -> u16 {
    3306
}

fn default_name() -> String {
    "argument-mining".to_string()
}

fn default_pool_size() -> u32 {
    5
}

fn default_connect_timeout_secs() -> u64 {
    30
}

fn default_pre_ping() -> bool {
    true
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            host: default_host(),
            port: default_port(),
            name: default_name(),
            user: None,
            password: None,
            pool_size: default_pool_size(),
            connect_timeout_secs: default_connect_timeout_secs(),
            pre_ping: default_pre_ping(),
        }
    }
}

impl DatabaseSettings {
    /// Settings that connect to an explicit URL with default pool options.
    #[must_use]
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Apply environment overrides.
    ///
    /// `DATABASE_URL` replaces the configured URL. `ARGDB_DB_USER` and
    /// `ARGDB_DB_PASSWORD` fill in credentials for a composed URL.
    pub fn apply_env(&mut self) {
        if let Some(url) = non_empty_env(DATABASE_URL_ENV) {
            self.url = Some(url);
        }
        if let Some(user) = non_empty_env(DATABASE_USER_ENV) {
            self.user = Some(user);
        }
        if let Some(password) = non_empty_env(DATABASE_PASSWORD_ENV) {
            self.password = Some(password);
        }
    }

    /// Resolve the connection URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when neither a URL nor the
    /// host, name and user needed to compose one are present.
    #[allow(clippy::result_large_err)]
    pub fn resolve_url(&self) -> Result<String> {
        if let Some(url) = self.url.as_deref().map(str::trim) {
            if !url.is_empty() {
                return Ok(url.to_string());
            }
        }

        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.host",
            }
            .into());
        }
        if self.name.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.name",
            }
            .into());
        }
        let user = self
            .user
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or(ConfigError::MissingField {
                field: "database.user",
            })?;

        let mut url = Url::parse(&format!("mysql://{}:{}/", self.host.trim(), self.port))
            .map_err(|e| ConfigError::InvalidValue {
                field: "database.host",
                reason: e.to_string(),
            })?;
        url.set_username(user)
            .map_err(|()| ConfigError::InvalidValue {
                field: "database.user",
                reason: "cannot be used in a connection URL".to_string(),
            })?;
        if let Some(password) = self.password.as_deref() {
            url.set_password(Some(password))
                .map_err(|()| ConfigError::InvalidValue {
                    field: "database.password",
                    reason: "cannot be used in a connection URL".to_string(),
                })?;
        }
        url.set_path(&format!("/{}", self.name.trim()));
        Ok(url.to_string())
    }

    /// Validate pool options.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pool_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "connect_timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Hide the password of a connection URL for logs and output.
///
/// Values that are not URLs (SQLite paths) are returned unchanged.
#[must_use]
pub fn mask_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) if url.password().is_some() => {
            let _ = url.set_password(Some("****"));
            url.to_string()
        }
        _ => raw.to_string(),
    }
}
