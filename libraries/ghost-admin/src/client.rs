//! Main Ghost Admin API client.

use crate::authentication::AuthenticationService;
use crate::config::{ClientConfig, ADMIN_API_PATH};
use crate::database::DatabaseService;
use crate::error::{GhostError, Result};
use crate::posts::PostsService;
use crate::redirects::RedirectsService;
use crate::session::SessionService;
use crate::tags::TagsService;
use crate::transport::Transport;
use crate::types::ListParams;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

/// Client for the Ghost Admin API.
///
/// The client resolves admin endpoints against the site URL and sends them
/// through a [`Transport`], which takes care of credentials.
///
/// # Example
///
/// ```ignore
/// use ghost_admin::{AdminClient, ClientConfig};
///
/// let config = ClientConfig::new("https://blog.example.com");
/// let client = AdminClient::with_admin_key(config, "<id>:<hex secret>")?;
///
/// let posts = client.posts().list(None).await?;
/// println!("Found {} posts", posts.posts.len());
/// ```
#[derive(Debug)]
pub struct AdminClient {
    transport: Transport,
    base_url: Url,
}

impl AdminClient {
    /// Create a client for the site in `config` using `transport`.
    pub fn new(config: ClientConfig, transport: Transport) -> Result<Self> {
        let base_url = admin_base_url(&config.base_url)?;
        debug!(base_url = %base_url, transport = ?transport, "Created admin client");
        Ok(Self {
            transport,
            base_url,
        })
    }

    /// Client using token auth with the given admin key.
    pub fn with_admin_key(config: ClientConfig, key: &str) -> Result<Self> {
        let transport = Transport::token_auth(key, &config)?;
        Self::new(config, transport)
    }

    /// Client using cookie-based session auth. Call `session().create(..)`
    /// before anything else.
    pub fn with_session(config: ClientConfig) -> Result<Self> {
        let transport = Transport::session_auth(&config)?;
        Self::new(config, transport)
    }

    /// Admin API root, always ending in a slash.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Resolve a path relative to the admin API root.
    ///
    /// Paths are given without a leading slash, e.g. `"posts/"`.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        if path.starts_with('/') {
            return Err(GhostError::InvalidUrl(format!(
                "path {:?} must be relative to the admin API root",
                path
            )));
        }
        self.base_url
            .join(path)
            .map_err(|e| GhostError::InvalidUrl(format!("{}: {}", path, e)))
    }

    /// Start an authenticated request against an admin path.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        self.transport.request(method, url)
    }

    /// Start an authenticated request carrying `body` as JSON.
    pub fn json_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<RequestBuilder> {
        let body =
            serde_json::to_vec(body).map_err(|e| GhostError::Serialization(e.to_string()))?;
        Ok(self
            .request(method, path)?
            .header(CONTENT_TYPE, "application/json")
            .body(body))
    }

    /// Start a multipart POST with `file` as the principal part, followed by
    /// the extra text fields in `params`.
    pub fn upload_request(
        &self,
        path: &str,
        file: UploadFile,
        params: &[(&str, &str)],
    ) -> Result<RequestBuilder> {
        let part = Part::bytes(file.contents)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;

        let mut form = Form::new().part(file.field, part);
        for (name, value) in params {
            form = form.text(name.to_string(), value.to_string());
        }

        Ok(self.request(Method::POST, path)?.multipart(form))
    }

    /// Send a request and read the whole response body.
    ///
    /// The body is always consumed before this returns, whatever the status.
    /// Any non-2xx status is reported as `GhostError::Authentication`.
    pub async fn execute(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let response = request.send().await.map_err(GhostError::from_send)?;

        let status = response.status();
        let url = response.url().clone();
        let body = response.bytes().await?.to_vec();

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body).trim().to_string();
            let message = if text.is_empty() {
                format!("received {} status from API", status.as_u16())
            } else {
                text
            };
            warn!(url = %url, status = %status, "Request rejected by server");
            return Err(GhostError::Authentication {
                status: status.as_u16(),
                message,
            });
        }

        debug!(url = %url, status = %status, bytes = body.len(), "Request completed");
        Ok(ApiResponse { status, body })
    }

    /// GET a path and decode the JSON response.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&ListParams>,
    ) -> Result<Option<T>> {
        let mut request = self.request(Method::GET, path)?;
        if let Some(query) = query {
            request = request.query(query);
        }
        self.execute(request).await?.json()
    }

    /// Cookie-session operations.
    pub fn session(&self) -> SessionService<'_> {
        SessionService::new(self)
    }

    /// Site setup operations.
    pub fn authentication(&self) -> AuthenticationService<'_> {
        AuthenticationService::new(self)
    }

    pub fn posts(&self) -> PostsService<'_> {
        PostsService::new(self)
    }

    pub fn tags(&self) -> TagsService<'_> {
        TagsService::new(self)
    }

    /// Database export and import.
    pub fn database(&self) -> DatabaseService<'_> {
        DatabaseService::new(self)
    }

    /// redirects.json download and upload.
    pub fn redirects(&self) -> RedirectsService<'_> {
        RedirectsService::new(self)
    }
}

/// A successful response with its body fully read.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Decode the body as JSON. An empty body decodes to `None`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        if self.body.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(None);
        }
        serde_json::from_slice(&self.body)
            .map(Some)
            .map_err(|e| GhostError::Parse(e.to_string()))
    }
}

/// The file part of a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Form field name
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub contents: Vec<u8>,
}

impl UploadFile {
    /// File part holding `value` encoded as JSON.
    pub fn json<T: Serialize + ?Sized>(
        field: impl Into<String>,
        file_name: impl Into<String>,
        value: &T,
    ) -> Result<Self> {
        let contents =
            serde_json::to_vec(value).map_err(|e| GhostError::Serialization(e.to_string()))?;
        Ok(Self {
            field: field.into(),
            file_name: file_name.into(),
            content_type: "application/json".to_string(),
            contents,
        })
    }
}

/// Validate the site URL and append the admin API path.
fn admin_base_url(raw: &str) -> Result<Url> {
    if raw.is_empty() {
        return Err(GhostError::InvalidUrl("URL cannot be empty".into()));
    }
    if raw.ends_with('/') {
        return Err(GhostError::InvalidUrl(
            "base url must omit the trailing slash".into(),
        ));
    }

    let mut url = Url::parse(raw)
        .map_err(|e| GhostError::InvalidUrl(format!("failed to parse {} as a url: {}", raw, e)))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(GhostError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    let path = format!("{}{}", url.path().trim_end_matches('/'), ADMIN_API_PATH);
    url.set_path(&path);
    Ok(url)
}
