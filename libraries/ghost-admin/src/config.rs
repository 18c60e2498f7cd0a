//! Client and token configuration.
//!
//! Every tunable the client relies on lives on these values and is handed in
//! at construction time. Both deserialize with defaults, so a host
//! application can embed them in its own config file.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Path of the admin API below the site root.
pub const ADMIN_API_PATH: &str = "/ghost/api/v3/admin/";

/// Settings for the signed tokens sent in token-auth mode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenConfig {
    /// `aud` claim identifying the admin API surface version
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Scheme used in the `Authorization` header and as the token type
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// How long a freshly signed token stays valid
    #[serde(default = "default_lifetime_secs")]
    pub lifetime_secs: u64,

    /// Cached tokens are renewed this long before they actually expire
    #[serde(default = "default_expiry_leeway_secs")]
    pub expiry_leeway_secs: u64,
}

impl TokenConfig {
    pub fn lifetime(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.lifetime_secs as i64)
    }

    pub fn expiry_leeway(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.expiry_leeway_secs as i64)
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            audience: default_audience(),
            scheme: default_scheme(),
            lifetime_secs: default_lifetime_secs(),
            expiry_leeway_secs: default_expiry_leeway_secs(),
        }
    }
}

/// Configuration for connecting to a Ghost instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Site URL without a trailing slash, e.g. "https://blog.example.com".
    /// A sub-path is allowed ("https://example.com/blog").
    pub base_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout applied by the HTTP transport, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default)]
    pub token: TokenConfig,
}

impl ClientConfig {
    /// Create a config for the given site URL with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            token: TokenConfig::default(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout. Durations are kept to millisecond precision
    /// and anything shorter than one millisecond is raised to one.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis())
            .unwrap_or(u64::MAX)
            .max(1);
        self
    }

    pub fn with_token_config(mut self, token: TokenConfig) -> Self {
        self.token = token;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.max(1))
    }
}

fn default_audience() -> String {
    "/v3/admin/".to_string()
}

fn default_scheme() -> String {
    "Ghost".to_string()
}

fn default_lifetime_secs() -> u64 {
    5 * 60
}

fn default_expiry_leeway_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("ghost-admin-rs/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_ms() -> u64 {
    10_000
}
