//! Object-store client for the Hubic storage endpoint.
//!
//! Hubic hands out an OpenStack Swift endpoint. Every object lives in the
//! `default` container and is addressed as `<endpoint>/default/<path>`.
//! Methods return the raw [`HttpResponse`]; deciding which status codes mean
//! success is left to the caller.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use hubic_http::{Body, Error, HttpExecutor, HttpRequest, HttpResponse, ReqwestExecutor};

/// Largest page a container listing returns.
pub const LISTING_LIMIT: usize = 10_000;

/// Container holding all objects.
pub const CONTAINER: &str = "default";

pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";
pub const COPY_FROM_HEADER: &str = "X-Copy-From";

/// Content type of regular file objects.
pub const FILE_CONTENT_TYPE: &str = "application/octet-stream";
/// Content type of zero-length folder markers.
pub const DIRECTORY_CONTENT_TYPE: &str = "application/directory";

/// One object from a JSON container listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListingEntry {
    /// Full object path, including any folder prefix.
    pub name: String,
    pub content_type: String,
}

impl ListingEntry {
    /// Folder markers and other object kinds are not files.
    pub fn is_file(&self) -> bool {
        self.content_type == FILE_CONTENT_TYPE
    }
}

/// Decode the entries of a listing response body.
pub fn parse_listing(values: &[serde_json::Value]) -> Result<Vec<ListingEntry>, serde_json::Error> {
    values
        .iter()
        .map(|value| ListingEntry::deserialize(value))
        .collect()
}

/// Client for one storage endpoint and token.
#[derive(Clone)]
pub struct HubicClient {
    executor: Arc<dyn HttpExecutor>,
    container_url: Url,
    token: String,
}

impl HubicClient {
    pub fn new(endpoint: &str, token: impl Into<String>) -> Result<Self, Error> {
        Self::with_executor(Arc::new(ReqwestExecutor::new()?), endpoint, token)
    }

    pub fn with_executor(
        executor: Arc<dyn HttpExecutor>,
        endpoint: &str,
        token: impl Into<String>,
    ) -> Result<Self, Error> {
        let mut container_url = Url::parse(endpoint)?;
        container_url
            .path_segments_mut()
            .map_err(|_| Error::InvalidUrl {
                message: format!("{} cannot be used as a storage endpoint", endpoint),
            })?
            .pop_if_empty()
            .push(CONTAINER);

        Ok(Self {
            executor,
            container_url,
            token: token.into(),
        })
    }

    /// `<endpoint>/default`
    pub fn container_url(&self) -> &Url {
        &self.container_url
    }

    /// `<endpoint>/default/<path>`; a trailing `/` in `path` is kept.
    pub fn object_url(&self, path: &str) -> String {
        let mut url = self.container_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.extend(path.split('/'));
        }
        url.into()
    }

    fn authorized(&self, request: HttpRequest) -> HttpRequest {
        request.with_header(AUTH_TOKEN_HEADER, self.token.as_str())
    }

    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        let request = self.authorized(request);
        let response = self.executor.execute(&request)?;
        debug!(
            method = ?request.method,
            url = %request.url,
            status = response.status,
            "storage request"
        );
        Ok(response)
    }

    /// One page of at most `limit` objects directly under `path`, starting
    /// after `marker`, decoded as a JSON array.
    pub fn list_directory(
        &self,
        path: &str,
        marker: Option<&str>,
        limit: usize,
    ) -> Result<HttpResponse, Error> {
        let mut request = HttpRequest::get(self.container_url.as_str())
            .with_query("path", path)
            .with_query("format", "json")
            .with_query("limit", limit.to_string())
            .json_array();
        if let Some(marker) = marker {
            request = request.with_query("marker", marker);
        }
        self.execute(request)
    }

    /// Create a folder marker. Creating an existing marker again is harmless.
    pub fn create_directory(&self, path: &str) -> Result<HttpResponse, Error> {
        self.execute(
            HttpRequest::put(self.object_url(path))
                .with_header("Content-Length", "0")
                .with_header("Content-Type", DIRECTORY_CONTENT_TYPE),
        )
    }

    pub fn upload(&self, source: impl Into<Body>, target_path: &str) -> Result<HttpResponse, Error> {
        self.execute(HttpRequest::put(self.object_url(target_path)).with_body(source))
    }

    pub fn delete(&self, path: &str) -> Result<HttpResponse, Error> {
        self.execute(HttpRequest::delete(self.object_url(path)))
    }

    /// Stream the object at `source_path` into `local_file`.
    pub fn download(&self, source_path: &str, local_file: &Path) -> Result<HttpResponse, Error> {
        self.execute(HttpRequest::get(self.object_url(source_path)).binary(local_file))
    }

    /// Server-side copy of `source_path` to `target_path`.
    pub fn copy(&self, source_path: &str, target_path: &str) -> Result<HttpResponse, Error> {
        self.execute(
            HttpRequest::put(self.object_url(target_path))
                .with_header(COPY_FROM_HEADER, format!("{}/{}", CONTAINER, source_path))
                .with_header("Content-Length", "0"),
        )
    }
}
