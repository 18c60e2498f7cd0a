//! HTTP transport with credentials attached to every request.
//!
//! A [`Transport`] owns the underlying `reqwest::Client` and decides how
//! requests are authenticated:
//!
//! - **token**: each request asks a [`TokenProvider`] for a current token and
//!   sends it as `Authorization: Ghost <jwt>`;
//! - **session**: a cookie store captures the session cookie set by
//!   `SessionService::create` and replays it on later requests;
//! - **anonymous**: nothing is attached (used for the initial site setup).

use crate::config::ClientConfig;
use crate::error::Result;
use crate::token::{new_admin_token_source, TokenProvider};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder};
use std::sync::Arc;
use tracing::trace;
use url::Url;

enum Credentials {
    Anonymous,
    Token(Arc<dyn TokenProvider>),
    Session,
}

/// Request-issuing facility shared by all admin services.
pub struct Transport {
    http: Client,
    credentials: Credentials,
}

impl Transport {
    /// Transport that sends no credentials.
    pub fn anonymous(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            http: base_builder(config).build()?,
            credentials: Credentials::Anonymous,
        })
    }

    /// Token-auth transport for an admin key of the form `<id>:<hex secret>`.
    ///
    /// Fails with `GhostError::Validation` if the key is malformed.
    pub fn token_auth(key: &str, config: &ClientConfig) -> Result<Self> {
        let provider = new_admin_token_source(key, config.token.clone())?;
        Self::with_token_provider(Arc::new(provider), config)
    }

    /// Token-auth transport backed by any token provider.
    pub fn with_token_provider(
        provider: Arc<dyn TokenProvider>,
        config: &ClientConfig,
    ) -> Result<Self> {
        Ok(Self {
            http: base_builder(config).build()?,
            credentials: Credentials::Token(provider),
        })
    }

    /// Session-auth transport backed by an in-memory cookie jar.
    pub fn session_auth(config: &ClientConfig) -> Result<Self> {
        Self::with_cookie_store(Arc::new(Jar::default()), config)
    }

    /// Session-auth transport backed by the given cookie store.
    ///
    /// The store receives the session cookie while `SessionService::create`
    /// is still running and is consulted for every later request.
    pub fn with_cookie_store<C: CookieStore + 'static>(
        store: Arc<C>,
        config: &ClientConfig,
    ) -> Result<Self> {
        Ok(Self {
            http: base_builder(config).cookie_provider(store).build()?,
            credentials: Credentials::Session,
        })
    }

    /// Whether session cookies are captured and replayed by this transport.
    pub fn has_cookie_store(&self) -> bool {
        matches!(self.credentials, Credentials::Session)
    }

    /// Start a request, attaching a current token in token-auth mode.
    ///
    /// Token preparation failures abort before anything is sent.
    pub(crate) fn request(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let builder = self.http.request(method, url);
        match &self.credentials {
            Credentials::Token(provider) => {
                let token = provider.token()?;
                trace!(expiry = %token.expiry, "Attaching admin token");
                Ok(builder.header(AUTHORIZATION, token.authorization()))
            }
            Credentials::Anonymous | Credentials::Session => Ok(builder),
        }
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match self.credentials {
            Credentials::Anonymous => "anonymous",
            Credentials::Token(_) => "token",
            Credentials::Session => "session",
        };
        f.debug_struct("Transport").field("mode", &mode).finish()
    }
}

fn base_builder(config: &ClientConfig) -> ClientBuilder {
    Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.clone())
}
