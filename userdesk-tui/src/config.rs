//! Configuration loading for the userdesk TUI.
//!
//! All fields are required unless explicitly marked optional. No defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use userdesk_core::table::PAGE_SIZES;
use userdesk_core::QueryKeys;

pub const CONFIG_ENV_VAR: &str = "USERDESK_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TuiConfig {
    pub api_base_url: String,
    pub users_path: String,
    pub request_timeout_ms: u64,
    pub tick_rate_ms: u64,
    pub filter_debounce_ms: u64,
    pub page_size: usize,
    pub log_path: PathBuf,
    pub theme: ThemeConfig,
    /// Optional: query parameter names, `filters` and the empty name by default.
    #[serde(default)]
    pub query_keys: QueryKeys,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or USERDESK_CONFIG)")]
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
        let base = self.api_base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must start with http:// or https://".to_string(),
            });
        }
        if !self.users_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "users_path",
                reason: "must start with '/'".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tick_rate_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.filter_debounce_ms < self.tick_rate_ms {
            return Err(ConfigError::InvalidValue {
                field: "filter_debounce_ms",
                reason: "must be >= tick_rate_ms".to_string(),
            });
        }
        if !PAGE_SIZES.contains(&self.page_size) {
            return Err(ConfigError::InvalidValue {
                field: "page_size",
                reason: format!("must be one of {:?}", PAGE_SIZES),
            });
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.theme.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "theme.name",
                reason: "must not be empty".to_string(),
            });
        }
        if self.theme.name.to_ascii_lowercase() != "synthbrute" {
            return Err(ConfigError::InvalidValue {
                field: "theme.name",
                reason: "only 'synthbrute' is supported".to_string(),
            });
        }
        if self.query_keys.filters.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "query_keys.filters",
                reason: "must not be empty".to_string(),
            });
        }
        if self.query_keys.filters == self.query_keys.join_operator {
            return Err(ConfigError::InvalidValue {
                field: "query_keys.join_operator",
                reason: "must differ from query_keys.filters".to_string(),
            });
        }
        Ok(())
    }

    pub fn users_url(&self) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), self.users_path)
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    arg_value("--config").map(PathBuf::from)
}

/// Initial location query, as given by `--query '<text>'`.
pub fn initial_query_from_args() -> String {
    arg_value("--query").unwrap_or_default()
}

fn arg_value(flag: &str) -> Option<String> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == flag {
            return args.next();
        }
    }
    None
}
