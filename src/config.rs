use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::core_state::DEFAULT_INACTIVITY_TIMEOUT_SECS;

/// Application-level constants
pub const APP_NAME: &str = "Dispensary";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variables read by `AppConfig::from_env`.
pub const ENV_DATABASE: &str = "DISPENSARY_DATABASE";
pub const ENV_BIND: &str = "DISPENSARY_BIND";
pub const ENV_USERNAME: &str = "DISPENSARY_USERNAME";
pub const ENV_PASSWORD: &str = "DISPENSARY_PASSWORD";
pub const ENV_SESSION_TIMEOUT: &str = "DISPENSARY_SESSION_TIMEOUT_SECS";

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_USERNAME: &str = "admin";

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,dispensary_lib=debug"
}

/// Get the application data directory
/// ~/Dispensary/ on all platforms, current directory when home is unknown.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default store file
pub fn default_database_path() -> PathBuf {
    app_data_dir().join("dispensary.db")
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DISPENSARY_PASSWORD must be set")]
    MissingPassword,

    #[error("Invalid bind address {0}")]
    InvalidBindAddr(String),

    #[error("Invalid session timeout {0}, expected whole seconds")]
    InvalidSessionTimeout(String),
}

/// Runtime configuration for the binary.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub username: String,
    pub password: String,
    /// Idle time after which a session is dropped.
    pub session_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = lookup(ENV_DATABASE)
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        let bind_raw = lookup(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind_raw
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_raw.clone()))?;

        let username = lookup(ENV_USERNAME).unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        let password = lookup(ENV_PASSWORD)
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::MissingPassword)?;

        let session_timeout = match lookup(ENV_SESSION_TIMEOUT) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidSessionTimeout(raw.clone()))?,
            None => Duration::from_secs(DEFAULT_INACTIVITY_TIMEOUT_SECS),
        };

        Ok(Self {
            database_path,
            bind_addr,
            username,
            password,
            session_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn app_data_dir_ends_with_app_name() {
        assert!(app_data_dir().ends_with("Dispensary"));
        assert!(default_database_path().starts_with(app_data_dir()));
    }

    #[test]
    fn defaults_apply_when_only_password_set() {
        let config = AppConfig::from_lookup(lookup_from(&[(ENV_PASSWORD, "s3cret")])).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND);
        assert_eq!(config.username, DEFAULT_USERNAME);
        assert_eq!(config.database_path, default_database_path());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_PASSWORD, "s3cret"),
            (ENV_DATABASE, "/tmp/clinic.db"),
            (ENV_BIND, "0.0.0.0:9000"),
            (ENV_USERNAME, "pharmacist"),
        ]))
        .unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/clinic.db"));
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.username, "pharmacist");
    }

    #[test]
    fn missing_password_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingPassword);
        let err = AppConfig::from_lookup(lookup_from(&[(ENV_PASSWORD, "")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingPassword);
    }

    #[test]
    fn bad_bind_address_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[
            (ENV_PASSWORD, "s3cret"),
            (ENV_BIND, "not-an-addr"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidBindAddr("not-an-addr".into()));
    }

    #[test]
    fn app_version_is_semver() {
        let parts: Vec<&str> = APP_VERSION.split('.').collect();
        assert_eq!(parts.len(), 3, "unexpected version {APP_VERSION}");
        assert!(parts.iter().all(|p| p.parse::<u32>().is_ok()));
    }

    #[test]
    fn session_timeout_defaults_to_fifteen_minutes() {
        let config = AppConfig::from_lookup(lookup_from(&[(ENV_PASSWORD, "s3cret")])).unwrap();
        assert_eq!(config.session_timeout, Duration::from_secs(900));
    }

    #[test]
    fn session_timeout_from_env() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_PASSWORD, "s3cret"),
            (ENV_SESSION_TIMEOUT, "120"),
        ]))
        .unwrap();
        assert_eq!(config.session_timeout, Duration::from_secs(120));

        let err = AppConfig::from_lookup(lookup_from(&[
            (ENV_PASSWORD, "s3cret"),
            (ENV_SESSION_TIMEOUT, "soon"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidSessionTimeout("soon".into()));
    }
}
