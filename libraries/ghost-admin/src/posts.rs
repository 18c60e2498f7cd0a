//! Post operations for the Ghost Admin API.

use crate::client::AdminClient;
use crate::error::{GhostError, Result};
use crate::types::{ListParams, Post, PostsResponse};
use tracing::debug;

/// Posts client for the Ghost Admin API.
pub struct PostsService<'a> {
    client: &'a AdminClient,
}

impl<'a> PostsService<'a> {
    pub(crate) fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    /// Fetch a single post by id.
    pub async fn get(&self, id: &str) -> Result<Post> {
        let path = format!("posts/{}", id);
        debug!(post_id = %id, "Fetching post");

        let response: PostsResponse = self
            .client
            .get_json(&path, None)
            .await?
            .unwrap_or_default();

        response.posts.into_iter().next().ok_or_else(|| {
            GhostError::UnexpectedResponse(format!("no post returned for id {}", id))
        })
    }

    /// Browse posts, optionally filtered and paginated by `params`.
    pub async fn list(&self, params: Option<&ListParams>) -> Result<PostsResponse> {
        let response: PostsResponse = self
            .client
            .get_json("posts/", params)
            .await?
            .unwrap_or_default();

        debug!(
            posts = response.posts.len(),
            total = ?response.meta.as_ref().and_then(|m| m.pagination.as_ref()).and_then(|p| p.total),
            "Fetched posts"
        );

        Ok(response)
    }
}
