use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use super::defaults::*;
use super::validation::validate_config;
use crate::messages::cache::DEFAULT_PAGE_SIZE;
use crate::qa::DEFAULT_MAX_TOKENS;

const REDACT_PLACEHOLDER: &str = "****";
const CONFIG_PATH_ENV: &str = "AURORA_CONFIG_PATH";
const DEFAULT_CONFIG_FILE: &str = "config.yml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting `{0}`")]
    Missing(&'static str),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

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
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Process configuration, injected into every component at construction.
///
/// Resolved from built-in defaults, then an optional YAML file, then the
/// environment (later layers win).
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub upstream_url: String,
    pub api_key: String,
    pub page_size: usize,
    pub cache_path: PathBuf,
    pub llm_base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub fetch_timeout_secs: u64,
    pub llm_timeout_secs: u64,
    pub host: String,
    pub port: u16,
    pub log_dir: PathBuf,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            api_key: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            llm_base_url: DEFAULT_LLM_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            llm_timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            cors_allowed_origins: default_cors_origins(),
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() { "" } else { REDACT_PLACEHOLDER };
        f.debug_struct("AppConfig")
            .field("upstream_url", &self.upstream_url)
            .field("api_key", &api_key)
            .field("page_size", &self.page_size)
            .field("cache_path", &self.cache_path)
            .field("llm_base_url", &self.llm_base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_dir", &self.log_dir)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

impl AppConfig {
    /// Load from `AURORA_CONFIG_PATH` (or `./config.yml` when present) and
    /// the process environment, then validate.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match config_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok())?;
        validate_config(&config)?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, serde_yaml::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }

    /// Overlay environment values. `lookup` abstracts `std::env::var` so the
    /// layering can be exercised without touching the process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(v) = get("AURORA_UPSTREAM_URL") {
            self.upstream_url = v;
        }
        if let Some(v) = get("OPENROUTER_API_KEY") {
            self.api_key = v;
        }
        if let Some(v) = get("AURORA_PAGE_SIZE") {
            self.page_size = parse_number("page_size", &v)?;
        }
        if let Some(v) = get("AURORA_CACHE_PATH") {
            self.cache_path = PathBuf::from(v);
        }
        if let Some(v) = get("AURORA_LLM_BASE_URL") {
            self.llm_base_url = v;
        }
        if let Some(v) = get("AURORA_MODEL") {
            self.model = v;
        }
        if let Some(v) = get("AURORA_MAX_TOKENS") {
            self.max_tokens = parse_number("max_tokens", &v)?;
        }
        if let Some(v) = get("AURORA_FETCH_TIMEOUT_SECS") {
            self.fetch_timeout_secs = parse_number("fetch_timeout_secs", &v)?;
        }
        if let Some(v) = get("AURORA_LLM_TIMEOUT_SECS") {
            self.llm_timeout_secs = parse_number("llm_timeout_secs", &v)?;
        }
        if let Some(v) = get("AURORA_HOST") {
            self.host = v;
        }
        if let Some(v) = get("PORT") {
            self.port = parse_number("port", &v)?;
        }
        if let Some(v) = get("AURORA_LOG_DIR") {
            self.log_dir = PathBuf::from(v);
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    local.exists().then_some(local)
}

fn parse_number<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse::<T>()
        .map_err(|_| ConfigError::invalid(field, format!("`{}` is not a valid number", raw)))
}
