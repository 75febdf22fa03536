//! Client configuration.
//!
//! Loaded from a JSON file with camelCase keys, then optionally
//! overridden from `QEEK_*` environment variables.

use crate::cloud_account::{CloudAccountConfig, CloudAccountService};
use crate::qts::{QtsConfig, QtsService};
use log::info;
use qeek_core::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ENV_QBUS_PATH: &str = "QEEK_QBUS_PATH";
pub const ENV_QBUS_NAMESPACE: &str = "QEEK_QBUS_NAMESPACE";
pub const ENV_DEBUG: &str = "QEEK_DEBUG";
pub const ENV_CLOUD_BASE_URL: &str = "QEEK_CLOUD_BASE_URL";
pub const ENV_LOG_LEVEL: &str = "QEEK_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "QEEK_LOG_FORMAT";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

// ── Logging ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format {other:?}")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

fn default_level() -> String {
    "info".into()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `qeek_qts=debug,warn`.
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

// ── Root config ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    #[serde(default)]
    pub qts: QtsConfig,
    #[serde(default)]
    pub cloud_account: CloudAccountConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl ClientConfig {
    /// Read a JSON config file. Missing sections take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("loaded client config from {}", path.display());
        Ok(config)
    }

    /// Defaults overridden by the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Apply `QEEK_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(path) = lookup(ENV_QBUS_PATH) {
            self.qts.qbus_path = if path.is_empty() { None } else { Some(path) };
        }
        if let Some(ns) = lookup(ENV_QBUS_NAMESPACE) {
            self.qts.namespace = ns;
        }
        if let Some(value) = lookup(ENV_DEBUG) {
            self.qts.debug = parse_bool(&value).ok_or(ConfigError::InvalidEnv { var: ENV_DEBUG, value })?;
        }
        if let Some(url) = lookup(ENV_CLOUD_BASE_URL) {
            self.cloud_account.base_url = url;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log.level = level;
        }
        if let Some(value) = lookup(ENV_LOG_FORMAT) {
            self.log.format = value.parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_LOG_FORMAT,
                value,
            })?;
        }
        Ok(())
    }

    pub fn qts_service(&self) -> Result<QtsService, ApiError> {
        QtsService::from_config(&self.qts)
    }

    pub fn cloud_account_service(&self, token: &str) -> Result<CloudAccountService, ApiError> {
        CloudAccountService::with_token(&self.cloud_account, token)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let c = ClientConfig::default();
        assert_eq!(c.qts.namespace, "");
        assert_eq!(c.cloud_account.base_url, "https://core.api.myqnapcloud.com");
        assert_eq!(c.log.level, "info");
        assert_eq!(c.log.format, LogFormat::Text);
    }

    #[test]
    fn load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"qts":{{"namespace":"com.qnap.dj2","qbusPath":"/sbin/qbus"}},"log":{{"format":"json"}}}}"#
        )
        .unwrap();

        let c = ClientConfig::load(file.path()).unwrap();
        assert_eq!(c.qts.namespace, "com.qnap.dj2");
        assert_eq!(c.qts.qbus_path.as_deref(), Some("/sbin/qbus"));
        assert!(!c.qts.debug);
        assert_eq!(c.log.format, LogFormat::Json);
        assert_eq!(c.log.level, "info");
        assert_eq!(c.cloud_account, CloudAccountConfig::default());
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = ClientConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("failed to parse config"));
    }

    #[test]
    fn vars_override_everything() {
        let mut c = ClientConfig::default();
        c.apply_vars(vars(&[
            (ENV_QBUS_PATH, "/usr/bin/qbus"),
            (ENV_QBUS_NAMESPACE, "com.qnap.qeek"),
            (ENV_DEBUG, "yes"),
            (ENV_CLOUD_BASE_URL, "http://localhost:9000"),
            (ENV_LOG_LEVEL, "debug"),
            (ENV_LOG_FORMAT, "JSON"),
        ]))
        .unwrap();
        assert_eq!(c.qts.qbus_path.as_deref(), Some("/usr/bin/qbus"));
        assert_eq!(c.qts.namespace, "com.qnap.qeek");
        assert!(c.qts.debug);
        assert_eq!(c.cloud_account.base_url, "http://localhost:9000");
        assert_eq!(c.log.level, "debug");
        assert_eq!(c.log.format, LogFormat::Json);
    }

    #[test]
    fn empty_qbus_path_clears_override() {
        let mut c = ClientConfig::default();
        c.qts.qbus_path = Some("/opt/qbus".into());
        c.apply_vars(vars(&[(ENV_QBUS_PATH, "")])).unwrap();
        assert!(c.qts.qbus_path.is_none());
    }

    #[test]
    fn invalid_debug_flag() {
        let err = ClientConfig::default()
            .apply_vars(vars(&[(ENV_DEBUG, "maybe")]))
            .unwrap_err();
        assert_eq!(err.to_string(), r#"invalid value for QEEK_DEBUG: "maybe""#);
    }

    #[test]
    fn invalid_log_format() {
        let err = ClientConfig::default()
            .apply_vars(vars(&[(ENV_LOG_FORMAT, "xml")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: ENV_LOG_FORMAT, .. }));
    }

    #[test]
    fn log_format_round_trip_text() {
        assert_eq!("plain".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!(LogFormat::Json.to_string(), "json");
    }

    #[test]
    #[serial]
    fn apply_env_reads_process_environment() {
        std::env::set_var(ENV_QBUS_NAMESPACE, "com.qnap.from-env");
        std::env::set_var(ENV_DEBUG, "1");
        let result = ClientConfig::from_env();
        std::env::remove_var(ENV_QBUS_NAMESPACE);
        std::env::remove_var(ENV_DEBUG);

        let c = result.unwrap();
        assert_eq!(c.qts.namespace, "com.qnap.from-env");
        assert!(c.qts.debug);
    }

    #[test]
    #[serial]
    fn services_from_config() {
        std::env::set_var(ENV_QBUS_NAMESPACE, "com.qnap.dj2");
        let mut c = ClientConfig::default();
        let result = c.apply_env();
        std::env::remove_var(ENV_QBUS_NAMESPACE);
        result.unwrap();

        let qts = c.qts_service().unwrap();
        assert_eq!(qts.namespace(), "com.qnap.dj2");
        let cloud = c.cloud_account_service("tok").unwrap();
        assert_eq!(cloud.client().base_url().as_str(), "https://core.api.myqnapcloud.com/");
    }

    #[test]
    fn qts_service_requires_namespace() {
        assert!(ClientConfig::default().qts_service().unwrap_err().is_invalid_argument());
    }
}
