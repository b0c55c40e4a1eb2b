//! Centralized configuration for oddb.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Default cleaning pattern applied to free-text names before searching.
///
/// Strips bracketed release-group tags, resolution, source and codec tokens,
/// and dotted years such as `.2019.` from file-derived titles.
pub const DEFAULT_NAME_PATTERN: &str = r"\[[^\]]*\]|【[^】]*】|\([^)]*\)|\b\d{3,4}[pPiI]\b|(?i:\b(?:blu-?ray|web-?dl|webrip|hdtv|remux|x26[45]|h\.?26[45]|hevc|aac|dts|hdr|10bit)\b)|\.\d{4}\.";

/// Errors raised while building or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Central configuration for all oddb components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddbConfig {
    pub api: ApiConfig,
    /// Poster size parameter passed to subject lookups (`s=`)
    pub poster_size: String,
    /// Regex whose matches are removed from names before searching
    pub name_pattern: String,
    /// What to do when the cast/crew fetch fails after a subject resolved
    pub cast_failure_policy: CastFailurePolicy,
}

impl Default for OddbConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            poster_size: "m".to_string(),
            name_pattern: DEFAULT_NAME_PATTERN.to_string(),
            cast_failure_policy: CastFailurePolicy::Fail,
        }
    }
}

/// Open Douban API server connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API server, without trailing path
    pub base_url: String,
    /// HTTP request timeout
    pub request_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout: Duration::from_secs(30),
            user_agent: "oddb/0.1.0".to_string(),
        }
    }
}

/// Policy for a failed cast/crew fetch once the main record is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastFailurePolicy {
    /// Propagate the error; no metadata is returned.
    #[default]
    Fail,
    /// Log and return the record without people.
    Partial,
}

impl FromStr for CastFailurePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "partial" => Ok(Self::Partial),
            _ => Err(ConfigError::InvalidValue {
                key: "cast_failure_policy",
                value: s.to_string(),
            }),
        }
    }
}

impl OddbConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Unparseable values are ignored and the default is kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("ODDB_API_URL") {
            config.api.base_url = url.trim_end_matches('/').to_string();
        }

        if let Ok(timeout) = std::env::var("ODDB_API_TIMEOUT")
            && let Ok(seconds) = timeout.parse::<u64>()
        {
            config.api.request_timeout = Duration::from_secs(seconds);
        }

        if let Ok(size) = std::env::var("ODDB_POSTER_SIZE")
            && !size.trim().is_empty()
        {
            config.poster_size = size.trim().to_string();
        }

        if let Ok(pattern) = std::env::var("ODDB_NAME_PATTERN")
            && !pattern.is_empty()
        {
            config.name_pattern = pattern;
        }

        if let Ok(policy) = std::env::var("ODDB_CAST_FAILURE_POLICY")
            && let Ok(policy) = policy.parse()
        {
            config.cast_failure_policy = policy;
        }

        config
    }

    /// Checks values that cannot be validated by their types alone.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidBaseUrl` - If the API base URL does not parse
    ///   or is not http(s)
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed =
            url::Url::parse(&self.api.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
                url: self.api.base_url.clone(),
                reason: e.to_string(),
            })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.api.base_url.clone(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        Ok(())
    }
}

/// Shared, hot-reloadable configuration handle.
///
/// Readers query the current values per call so an update is seen by the
/// next operation without restarting anything.
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<OddbConfig>>,
}

impl SharedConfig {
    /// Wraps a configuration for sharing.
    pub fn new(config: OddbConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Current poster size parameter.
    pub fn poster_size(&self) -> String {
        self.inner.read().poster_size.clone()
    }

    /// Current name cleaning pattern.
    pub fn name_pattern(&self) -> String {
        self.inner.read().name_pattern.clone()
    }

    /// Current cast failure policy.
    pub fn cast_failure_policy(&self) -> CastFailurePolicy {
        self.inner.read().cast_failure_policy
    }

    /// Applies a change in place.
    pub fn update(&self, change: impl FnOnce(&mut OddbConfig)) {
        change(&mut self.inner.write());
    }
}
