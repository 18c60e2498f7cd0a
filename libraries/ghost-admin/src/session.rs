//! Cookie-based session establishment.

use crate::client::AdminClient;
use crate::error::{GhostError, Result};
use crate::types::UserCredentials;
use reqwest::{Method, StatusCode};
use tracing::{debug, info, warn};

/// Session client for the Ghost Admin API.
///
/// Requires an [`AdminClient`] whose transport has a cookie store
/// (`Transport::session_auth` or `Transport::with_cookie_store`): the
/// session cookie returned by the server is kept there and sent with every
/// later request to the same site.
pub struct SessionService<'a> {
    client: &'a AdminClient,
}

impl<'a> SessionService<'a> {
    pub(crate) fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    /// Log in and establish the session.
    ///
    /// Succeeds only on `201 Created`. When this returns `Ok`, the response
    /// body has been read to the end and the session cookie is already in the
    /// transport's cookie store.
    pub async fn create(&self, username: &str, password: &str) -> Result<()> {
        if !self.client.transport().has_cookie_store() {
            return Err(GhostError::Validation(
                "session auth requires a cookie-store-backed transport".to_string(),
            ));
        }

        let credentials = UserCredentials { username, password };
        let request = self
            .client
            .json_request(Method::POST, "session/", &credentials)?;

        debug!(username = %username, "Creating admin session");

        // Ghost may not have persisted the session until the response stream
        // is consumed, and a request sent earlier can be refused. `execute`
        // drains the body before returning.
        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(GhostError::Authentication { status, message }) => {
                warn!(status, error = %message, "Login failed");
                return Err(GhostError::Authentication {
                    status,
                    message: format!("failed to establish session: {}", message),
                });
            }
            Err(e) => return Err(e),
        };

        if response.status != StatusCode::CREATED {
            warn!(status = %response.status, "Login returned unexpected status");
            return Err(GhostError::Authentication {
                status: response.status.as_u16(),
                message: "failed to establish session".to_string(),
            });
        }

        info!(username = %username, "Admin session established");
        Ok(())
    }
}
