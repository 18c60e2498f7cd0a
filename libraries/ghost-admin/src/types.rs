//! Types for Ghost Admin API requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pretty-print a model as indented JSON.
fn stringify<T: Serialize>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let json = serde_json::to_string_pretty(value).map_err(|_| fmt::Error)?;
    f.write_str(&json)
}

macro_rules! display_as_json {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    stringify(self, f)
                }
            }
        )+
    };
}

// =============================================================================
// Setup & Session Types
// =============================================================================

/// Information needed to set up a fresh Ghost instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SetupDetails {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "blogTitle")]
    pub blog_title: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SetupWrapper<'a> {
    pub setup: [&'a SetupDetails; 1],
}

/// Credentials of the user establishing a session.
#[derive(Debug, Serialize)]
pub(crate) struct UserCredentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

// =============================================================================
// Content Types
// =============================================================================

/// A role a user may have.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Role {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A post author.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Author {
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub email: Option<String>,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub accessibility: Option<String>,
    pub status: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub tour: Option<bool>,
    pub last_seen: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub roles: Vec<Role>,
    pub url: Option<String>,
}

/// A post or page tag.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Tag {
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub feature_image: Option<String>,
    pub visibility: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub url: Option<String>,
}

/// A Ghost post.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Post {
    pub slug: Option<String>,
    pub id: Option<String>,
    pub uuid: Option<String>,
    pub title: Option<String>,
    pub mobiledoc: Option<String>,
    pub html: Option<String>,
    pub comment_id: Option<String>,
    pub feature_image: Option<String>,
    pub featured: Option<bool>,
    pub status: Option<String>,
    pub visibility: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub custom_excerpt: Option<String>,
    pub codeinjection_head: Option<String>,
    pub codeinjection_foot: Option<String>,
    pub custom_template: Option<String>,
    pub canonical_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub authors: Vec<Author>,
    pub primary_author: Option<Author>,
    pub primary_tag: Option<Tag>,
    pub url: Option<String>,
    pub excerpt: Option<String>,
    pub reading_time: Option<u32>,
    pub og_image: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub twitter_image: Option<String>,
    pub twitter_title: Option<String>,
    pub twitter_description: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

// =============================================================================
// Browse Types
// =============================================================================

/// Page size of a browse request or response. Ghost also accepts the
/// keyword `"all"` in place of a number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Limit {
    Count(u32),
    Keyword(String),
}

impl Limit {
    /// Return every record in a single page.
    pub fn all() -> Self {
        Limit::Keyword("all".to_string())
    }
}

impl From<u32> for Limit {
    fn from(count: u32) -> Self {
        Limit::Count(count)
    }
}

/// Pagination details of a browse response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Pagination {
    pub page: Option<u32>,
    pub limit: Option<Limit>,
    pub pages: Option<u32>,
    pub total: Option<u32>,
    pub next: Option<u32>,
    pub prev: Option<u32>,
}

/// Metadata attached to browse responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Meta {
    pub pagination: Option<Pagination>,
}

/// Query parameters for browse endpoints. Unset fields are omitted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Limit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formats: Option<String>,
}

/// Envelope of post responses.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PostsResponse {
    #[serde(default)]
    pub posts: Vec<Post>,
    pub meta: Option<Meta>,
}

/// Envelope of tag responses.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub meta: Option<Meta>,
}

display_as_json!(Role, Author, Tag, Post, PostsResponse, TagsResponse);

// =============================================================================
// Database Types
// =============================================================================

/// Metadata about the source of a database dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_on: Option<i64>,
}

/// A full database dump with its metadata.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Database {
    pub meta: Option<DatabaseMeta>,
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// A warning or oddity reported while importing a database.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DatabaseImportProblem {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub context: String,
    pub err: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DatabaseWrapper {
    #[serde(default)]
    pub db: Vec<Database>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DatabaseImportWrapper {
    #[serde(default)]
    pub problems: Vec<DatabaseImportProblem>,
}

// =============================================================================
// Redirect Types
// =============================================================================

/// A single entry of the redirects.json file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Redirect {
    pub from: String,
    pub to: String,
}
