// onboard-client/src/config.rs
// Client configuration: defaults, then `ONBOARD_*` env, then CLI flags

use shared::StalePolicy;

use crate::{ClientResult, NetworkHttpClient};

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Client configuration for connecting to the onboarding backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root (e.g., "http://localhost:3000/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// What to do with a designation/state selection its refreshed list lacks
    pub stale_policy: StalePolicy,

    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
}

impl ClientConfig {
    /// Create a configuration pointing at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
            stale_policy: StalePolicy::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Load from process environment
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | ONBOARD_API_URL | http://localhost:3000/api |
    /// | ONBOARD_TIMEOUT_SECS | 30 |
    /// | ONBOARD_STALE_POLICY | clear-if-absent |
    /// | ONBOARD_LOG_LEVEL | info |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; unparseable values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("ONBOARD_API_URL").filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup("ONBOARD_TIMEOUT_SECS") {
            match raw.trim().parse() {
                Ok(secs) => config.timeout = secs,
                Err(_) => tracing::warn!(value = %raw, "Ignoring invalid ONBOARD_TIMEOUT_SECS"),
            }
        }
        if let Some(raw) = lookup("ONBOARD_STALE_POLICY") {
            match raw.parse() {
                Ok(policy) => config.stale_policy = policy,
                Err(e) => tracing::warn!(error = %e, "Ignoring invalid ONBOARD_STALE_POLICY"),
            }
        }
        if let Some(level) = lookup("ONBOARD_LOG_LEVEL").filter(|v| !v.trim().is_empty()) {
            config.log_level = level.trim().to_string();
        }

        config
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the stale selection policy
    pub fn with_stale_policy(mut self, policy: StalePolicy) -> Self {
        self.stale_policy = policy;
        self
    }

    /// Set the log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
