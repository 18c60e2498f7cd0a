//! Initial site setup.

use crate::client::AdminClient;
use crate::error::{GhostError, Result};
use crate::types::{SetupDetails, SetupWrapper};
use reqwest::{Method, StatusCode};
use tracing::info;

/// Handles setting up a fresh Ghost instance. Setup needs no credentials,
/// so an anonymous transport is enough.
pub struct AuthenticationService<'a> {
    client: &'a AdminClient,
}

impl<'a> AuthenticationService<'a> {
    pub(crate) fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    /// Create the owner account and name the blog.
    pub async fn setup(&self, details: &SetupDetails) -> Result<()> {
        let wrapper = SetupWrapper { setup: [details] };
        let request = self
            .client
            .json_request(Method::POST, "authentication/setup", &wrapper)?;

        let response = self.client.execute(request).await?;
        if response.status != StatusCode::CREATED {
            return Err(GhostError::Authentication {
                status: response.status.as_u16(),
                message: "failed to setup".to_string(),
            });
        }

        info!(email = %details.email, blog_title = %details.blog_title, "Site setup complete");
        Ok(())
    }
}
