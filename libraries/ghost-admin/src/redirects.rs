//! Download and upload of the redirects.json file.

use crate::client::{AdminClient, UploadFile};
use crate::error::Result;
use crate::types::Redirect;
use tracing::{debug, info};

/// Redirects client for the Ghost Admin API.
pub struct RedirectsService<'a> {
    client: &'a AdminClient,
}

impl<'a> RedirectsService<'a> {
    pub(crate) fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    /// Fetch the current redirects.
    pub async fn download(&self) -> Result<Vec<Redirect>> {
        let redirects: Vec<Redirect> = self
            .client
            .get_json("redirects/json", None)
            .await?
            .unwrap_or_default();

        debug!(redirects = redirects.len(), "Downloaded redirects");
        Ok(redirects)
    }

    /// Replace the redirects with `redirects`.
    pub async fn upload(&self, redirects: &[Redirect]) -> Result<()> {
        let file = UploadFile::json("redirects", "redirects.json", redirects)?;
        let request = self.client.upload_request("redirects/json", file, &[])?;

        self.client.execute(request).await?;

        info!(redirects = redirects.len(), "Uploaded redirects");
        Ok(())
    }
}
