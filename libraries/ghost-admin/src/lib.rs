//! Ghost Admin API Client
//!
//! HTTP client library for the administrative API of a Ghost site.
//!
//! # Features
//!
//! - **Token auth**: HS256-signed tokens derived from an admin key, cached and
//!   renewed transparently
//! - **Session auth**: cookie-based login with a pluggable cookie store
//! - **Posts & tags**: fetch and browse content
//! - **Database**: export and import the full database
//! - **Redirects**: download and upload redirects.json
//!
//! # Example
//!
//! ```ignore
//! use ghost_admin::{AdminClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Token auth with an admin key
//!     let config = ClientConfig::new("https://blog.example.com");
//!     let client = AdminClient::with_admin_key(config, "<id>:<hex secret>")?;
//!     let posts = client.posts().list(None).await?;
//!     println!("Found {} posts", posts.posts.len());
//!
//!     // Session auth with a username and password
//!     let config = ClientConfig::new("https://blog.example.com");
//!     let client = AdminClient::with_session(config)?;
//!     client.session().create("owner@example.com", "password").await?;
//!     let redirects = client.redirects().download().await?;
//!     println!("{} redirects", redirects.len());
//!
//!     Ok(())
//! }
//! ```

mod authentication;
mod client;
mod config;
mod database;
mod error;
mod posts;
mod redirects;
mod session;
mod tags;
mod token;
mod transport;
mod types;

// Re-export main types
pub use client::{AdminClient, ApiResponse, UploadFile};
pub use config::{ClientConfig, TokenConfig, ADMIN_API_PATH};
pub use error::{GhostError, Result};
pub use token::{
    new_admin_token_source, validate_key, AdminToken, AdminTokenSource, CachingTokenProvider,
    Claims, TokenProvider,
};
pub use transport::Transport;
pub use types::{
    Author, Database, DatabaseImportProblem, DatabaseMeta, Limit, ListParams, Meta, Pagination,
    Post, PostsResponse, Redirect, Role, SetupDetails, Tag, TagsResponse,
};

// Re-export sub-clients for direct use if needed
pub use authentication::AuthenticationService;
pub use database::DatabaseService;
pub use posts::PostsService;
pub use redirects::RedirectsService;
pub use session::SessionService;
pub use tags::TagsService;
