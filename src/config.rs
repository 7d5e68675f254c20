//! Client configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use crate::error::{ClientError, Result};
use std::env;
use std::time::Duration;

/// Production backend host
pub const PRODUCTION_BASE_URL: &str = "https://api.yourdomain.com";

/// Local development backend host
pub const DEVELOPMENT_BASE_URL: &str = "http://localhost:8000";

/// Backend endpoint paths, relative to the base URL
pub mod endpoints {
    /// Multipart BPMN upload
    pub const UPLOAD: &str = "/api/v1/bpmn/upload";
    /// Per-expert suggestions; the expert id is appended as a path segment
    pub const SUGGESTIONS: &str = "/api/v1/bpmn/suggestions";
    /// Backend reachability check
    pub const HEALTH_CHECK: &str = "/api/health-check";
}

/// Which backend the client talks to by default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Deployed backend
    Production,
    /// Backend running on the developer's machine
    Development,
}

impl Environment {
    /// Environment selected at build time: release builds target production
    pub fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Environment::Development
        } else {
            Environment::Production
        }
    }

    /// Parse an environment name (`production`/`prod`, `development`/`dev`)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Some(Environment::Production),
            "development" | "dev" => Some(Environment::Development),
            _ => None,
        }
    }

    /// Default base URL for this environment
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_BASE_URL,
            Environment::Development => DEVELOPMENT_BASE_URL,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend API configuration
    pub api: ApiConfig,
    /// Connection monitor configuration
    pub monitor: MonitorConfig,
}

/// Backend API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Environment the base URL was derived from
    pub environment: Environment,
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Timeout for a single HTTP request (in seconds)
    pub request_timeout_secs: u64,
}

/// Connection monitor configuration
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Seconds between two health checks
    pub interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        let environment = Environment::from_build();
        Self {
            api: ApiConfig {
                environment,
                base_url: environment.base_url().to_string(),
                request_timeout_secs: 30,
            },
            monitor: MonitorConfig { interval_secs: 30 },
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    ///
    /// - `BPMN_ENV`: `production` or `development`, overrides the build default
    /// - `BPMN_API_BASE_URL`: explicit base URL, wins over `BPMN_ENV`
    /// - `REQUEST_TIMEOUT_SECS`: HTTP request timeout
    /// - `HEALTH_CHECK_INTERVAL_SECS`: connection monitor period
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();

        let environment = match lookup("BPMN_ENV") {
            Some(value) => Environment::parse(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "Unknown BPMN_ENV, using build default");
                default.api.environment
            }),
            None => default.api.environment,
        };

        let base_url = lookup("BPMN_API_BASE_URL")
            .map(|url| url.trim().to_string())
            .unwrap_or_else(|| environment.base_url().to_string());

        Self {
            api: ApiConfig {
                environment,
                base_url: base_url.trim_end_matches('/').to_string(),
                request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS")
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(default.api.request_timeout_secs),
            },
            monitor: MonitorConfig {
                interval_secs: lookup("HEALTH_CHECK_INTERVAL_SECS")
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(default.monitor.interval_secs),
            },
        }
    }

    /// Reject values the client cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            return Err(ClientError::Config("base URL cannot be empty".to_string()));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(ClientError::Config(format!(
                "base URL must start with http:// or https://: {}",
                self.api.base_url
            )));
        }
        if self.api.request_timeout_secs == 0 {
            return Err(ClientError::Config(
                "request_timeout_secs must be > 0".to_string(),
            ));
        }
        if self.monitor.interval_secs == 0 {
            return Err(ClientError::Config(
                "health check interval must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// HTTP request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    /// Connection monitor period
    pub fn health_check_interval(&self) -> Duration {
        Duration::from_secs(self.monitor.interval_secs)
    }
}
