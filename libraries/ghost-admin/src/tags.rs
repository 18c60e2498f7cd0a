//! Tag operations for the Ghost Admin API.

use crate::client::AdminClient;
use crate::error::{GhostError, Result};
use crate::types::{ListParams, Tag, TagsResponse};
use tracing::debug;

/// Tags client for the Ghost Admin API.
pub struct TagsService<'a> {
    client: &'a AdminClient,
}

impl<'a> TagsService<'a> {
    pub(crate) fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    /// Fetch a single tag by id.
    pub async fn get(&self, id: &str) -> Result<Tag> {
        let path = format!("tags/{}", id);
        debug!(tag_id = %id, "Fetching tag");

        let response: TagsResponse = self
            .client
            .get_json(&path, None)
            .await?
            .unwrap_or_default();

        response
            .tags
            .into_iter()
            .next()
            .ok_or_else(|| GhostError::UnexpectedResponse(format!("no tag returned for id {}", id)))
    }

    pub async fn list(&self, params: Option<&ListParams>) -> Result<TagsResponse> {
        let response: TagsResponse = self
            .client
            .get_json("tags/", params)
            .await?
            .unwrap_or_default();

        debug!(tags = response.tags.len(), "Fetched tags");
        Ok(response)
    }
}
