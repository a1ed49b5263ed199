//! Application configuration
//!
//! Provides TOML-based configuration with environment variable override
//! support. Priority: CLI args > Environment variables > Config file >
//! Defaults

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Origin of the recommendation API
    #[serde(default = "default_api_base_url")]
    api_base_url: String,

    /// Analytics tracking id; tracking is disabled when absent
    #[serde(default)]
    tracking_id: Option<String>,

    /// Minimum interval between autocomplete requests, in milliseconds
    #[serde(default = "default_autocomplete_rate_limit_ms")]
    autocomplete_rate_limit_ms: u64,

    /// Ceiling on simultaneously selected works
    #[serde(default = "default_max_query_works")]
    max_query_works: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_autocomplete_rate_limit_ms() -> u64 {
    250
}

fn default_max_query_works() -> usize {
    200
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            tracking_id: None,
            autocomplete_rate_limit_ms: default_autocomplete_rate_limit_ms(),
            max_query_works: default_max_query_works(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Create config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file: {}", e))?;
        Ok(config)
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("TROPEMATCH_API_BASE_URL") {
            config.api_base_url = base_url;
        }

        if let Ok(tracking_id) = std::env::var("TROPEMATCH_TRACKING_ID") {
            config.tracking_id = Some(tracking_id);
        }

        if let Ok(interval) = std::env::var("TROPEMATCH_AUTOCOMPLETE_RATE_LIMIT_MS") {
            if let Ok(ms) = interval.parse() {
                config.autocomplete_rate_limit_ms = ms;
            }
        }

        if let Ok(max_works) = std::env::var("TROPEMATCH_MAX_QUERY_WORKS") {
            if let Ok(n) = max_works.parse() {
                config.max_query_works = n;
            }
        }

        if let Ok(timeout) = std::env::var("TROPEMATCH_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                config.request_timeout_secs = secs;
            }
        }

        config
    }

    /// Merge with another config (other takes priority for non-default values)
    pub fn merge_with(&self, other: &Self) -> Self {
        Self {
            api_base_url: if other.api_base_url != default_api_base_url() {
                other.api_base_url.clone()
            } else {
                self.api_base_url.clone()
            },
            tracking_id: other
                .tracking_id
                .clone()
                .or_else(|| self.tracking_id.clone()),
            autocomplete_rate_limit_ms: if other.autocomplete_rate_limit_ms
                != default_autocomplete_rate_limit_ms()
            {
                other.autocomplete_rate_limit_ms
            } else {
                self.autocomplete_rate_limit_ms
            },
            max_query_works: if other.max_query_works != default_max_query_works() {
                other.max_query_works
            } else {
                self.max_query_works
            },
            request_timeout_secs: if other.request_timeout_secs != default_request_timeout_secs() {
                other.request_timeout_secs
            } else {
                self.request_timeout_secs
            },
        }
    }

    /// Override api_base_url
    pub fn with_api_base_url(mut self, url: &str) -> Self {
        self.api_base_url = url.to_string();
        self
    }

    /// Override max_query_works
    pub fn with_max_query_works(mut self, n: usize) -> Self {
        self.max_query_works = n;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.is_empty() {
            return Err(anyhow!("api_base_url must not be empty"));
        }

        if self.autocomplete_rate_limit_ms == 0 {
            return Err(anyhow!("autocomplete_rate_limit_ms must be greater than 0"));
        }

        if self.max_query_works == 0 {
            return Err(anyhow!("max_query_works must be greater than 0"));
        }

        Ok(())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| anyhow!("Failed to serialize config: {}", e))
    }

    // Getters
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn tracking_id(&self) -> Option<String> {
        self.tracking_id.clone()
    }

    pub fn autocomplete_rate_limit_ms(&self) -> u64 {
        self.autocomplete_rate_limit_ms
    }

    pub fn max_query_works(&self) -> usize {
        self.max_query_works
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
    }
}
