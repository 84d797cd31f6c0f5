//! Configuration loading for the EMUCON console.
//!
//! All fields are required unless explicitly marked optional. No defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TuiConfig {
    /// Origin of the backend proxy; routes live under `{api_base_url}/api`.
    pub api_base_url: String,
    /// Per-request timeout. Absent means requests wait indefinitely.
    pub request_timeout_ms: Option<u64>,
    pub refresh_interval_ms: u64,
    pub log_tail_interval_ms: u64,
    pub cache: CacheConfig,
    pub persistence_path: PathBuf,
    pub error_log_path: PathBuf,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    pub gc_time_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or EMUCON_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl TuiConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let path = path.ok_or(ConfigError::MissingConfigPath)?;
        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: TuiConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.api_base_url.trim();
        if base_url.is_empty() {
            return Err(invalid("api_base_url", "must not be empty"));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(invalid(
                "api_base_url",
                "must start with http:// or https://",
            ));
        }
        if self.request_timeout_ms == Some(0) {
            return Err(invalid("request_timeout_ms", "must be > 0 when set"));
        }
        require_positive("refresh_interval_ms", self.refresh_interval_ms)?;
        require_positive("log_tail_interval_ms", self.log_tail_interval_ms)?;
        require_positive("cache.gc_time_ms", self.cache.gc_time_ms)?;
        require_path("persistence_path", &self.persistence_path)?;
        require_path("error_log_path", &self.error_log_path)?;

        let theme = self.theme.name.trim();
        if theme.is_empty() {
            return Err(invalid("theme.name", "must not be empty"));
        }
        if !theme.eq_ignore_ascii_case("synthbrute") {
            return Err(invalid("theme.name", "only 'synthbrute' is supported"));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn log_tail_interval(&self) -> Duration {
        Duration::from_millis(self.log_tail_interval_ms)
    }

    pub fn gc_time(&self) -> Duration {
        Duration::from_millis(self.cache.gc_time_ms)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
}

fn require_positive(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(invalid(field, "must be > 0"));
    }
    Ok(())
}

fn require_path(field: &'static str, path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    Ok(())
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var("EMUCON_CONFIG").ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}
