//! SEO audit client configuration.
//!
//! All endpoints live under a single origin (the origin the web front end
//! is served from). Defaults point at a locally running API server.
//! Override via environment variables or explicit construction for
//! staging/testing.

use std::time::Duration;

use url::Url;

use crate::poll::{PollErrorPolicy, PollSettings};

/// Default origin: the API server's default bind address.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8000";

/// Configuration for connecting to the SEO audit API.
#[derive(Clone)]
pub struct AuditApiConfig {
    /// Origin every API path and page path is resolved against.
    pub origin: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Delay between completion polls, in milliseconds.
    pub poll_interval_ms: u64,
    /// Maximum number of completion polls before giving up.
    pub max_poll_attempts: u32,
    /// Whether a failed poll consumes one of `max_poll_attempts`.
    pub poll_error_policy: PollErrorPolicy,
}

impl std::fmt::Debug for AuditApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditApiConfig")
            .field("origin", &self.origin.as_str())
            .field("timeout_secs", &self.timeout_secs)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("max_poll_attempts", &self.max_poll_attempts)
            .field("poll_error_policy", &self.poll_error_policy)
            .finish()
    }
}

impl AuditApiConfig {
    /// Configuration for `origin` with default timeouts and polling cadence.
    pub fn new(origin: Url) -> Self {
        let poll = PollSettings::default();
        Self {
            origin,
            timeout_secs: 30,
            poll_interval_ms: poll.interval.as_millis() as u64,
            max_poll_attempts: poll.max_attempts,
            poll_error_policy: poll.error_policy,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `SEO_AUDIT_ORIGIN` (default: `http://localhost:8000`)
    /// - `SEO_AUDIT_TIMEOUT_SECS` (default: 30)
    /// - `SEO_AUDIT_POLL_INTERVAL_MS` (default: 2000)
    /// - `SEO_AUDIT_MAX_POLL_ATTEMPTS` (default: 60)
    /// - `SEO_AUDIT_COUNT_POLL_ERRORS` (default: `true`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_origin(None)
    }

    /// Like [`AuditApiConfig::from_env`], but an explicit `origin` replaces
    /// `SEO_AUDIT_ORIGIN`, which is then not read at all.
    pub fn from_env_with_origin(origin: Option<Url>) -> Result<Self, ConfigError> {
        let origin = match origin {
            Some(origin) => origin,
            None => env_url("SEO_AUDIT_ORIGIN", DEFAULT_ORIGIN)?,
        };
        let mut config = Self::new(origin);

        if let Some(secs) = env_parse("SEO_AUDIT_TIMEOUT_SECS")? {
            config.timeout_secs = secs;
        }
        if let Some(ms) = env_parse("SEO_AUDIT_POLL_INTERVAL_MS")? {
            config.poll_interval_ms = ms;
        }
        if let Some(max) = env_parse("SEO_AUDIT_MAX_POLL_ATTEMPTS")? {
            config.max_poll_attempts = max;
        }
        if let Ok(raw) = std::env::var("SEO_AUDIT_COUNT_POLL_ERRORS") {
            config.poll_error_policy = parse_error_policy("SEO_AUDIT_COUNT_POLL_ERRORS", &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Create a configuration pointing to a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be parsed.
    pub fn local_mock(port: u16) -> Result<Self, ConfigError> {
        let origin = Url::parse(&format!("http://127.0.0.1:{port}"))
            .map_err(|e| ConfigError::InvalidUrl("localhost".to_string(), e.to_string()))?;
        let mut config = Self::new(origin);
        config.timeout_secs = 5;
        Ok(config)
    }

    /// Reject configurations the client cannot operate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.origin.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(
                "origin".to_string(),
                format!("{} cannot be used as a base URL", self.origin),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::OutOfRange("timeout_secs"));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::OutOfRange("poll_interval_ms"));
        }
        if self.max_poll_attempts == 0 {
            return Err(ConfigError::OutOfRange("max_poll_attempts"));
        }
        Ok(())
    }

    /// Polling settings derived from this configuration.
    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(self.poll_interval_ms),
            max_attempts: self.max_poll_attempts,
            error_policy: self.poll_error_policy,
        }
    }

    /// The origin rendered without a trailing slash, as `location.origin` would.
    pub fn origin_str(&self) -> String {
        self.origin.as_str().trim_end_matches('/').to_string()
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

fn env_parse<T: std::str::FromStr>(var: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(var.to_string(), raw)),
        Err(_) => Ok(None),
    }
}

fn parse_error_policy(var: &str, raw: &str) -> Result<PollErrorPolicy, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(PollErrorPolicy::Counted),
        "0" | "false" | "no" => Ok(PollErrorPolicy::Uncounted),
        _ => Err(ConfigError::InvalidValue(var.to_string(), raw.to_string())),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid value for {0}: {1:?}")]
    InvalidValue(String, String),
    #[error("{0} must be greater than zero")]
    OutOfRange(&'static str),
    #[error("failed to build HTTP client: {0}")]
    ClientInit(String),
}
