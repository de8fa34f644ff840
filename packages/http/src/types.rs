use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bytes::Bytes;

/// HTTP method for requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    #[default]
    GET,
    HEAD,
    PUT,
    DELETE,
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => http::Method::GET,
            Method::HEAD => http::Method::HEAD,
            Method::PUT => http::Method::PUT,
            Method::DELETE => http::Method::DELETE,
        }
    }
}

/// Where the request body comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Body {
    /// No body. A PUT without a body is sent with `Content-Length: 0`.
    #[default]
    Empty,
    /// In-memory payload.
    Bytes(Bytes),
    /// Local file streamed from disk when the request is executed.
    File(PathBuf),
}

impl Body {
    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(Bytes::from(bytes))
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Bytes(bytes)
    }
}

/// How the response body is decoded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// Raw text.
    #[default]
    Plain,
    /// Any JSON value, usually an object.
    Json,
    /// A JSON array; anything else decodes as absent.
    JsonArray,
    /// Stream the body into the given local file.
    Binary(PathBuf),
}

/// A single HTTP request.
///
/// Every `with_*` call consumes the request and returns the updated one, so a
/// request value is never shared between two calls. Executing borrows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,

    /// Absolute URL
    pub url: String,

    pub query: HashMap<String, String>,

    pub headers: HashMap<String, String>,

    pub body: Body,

    pub response_mode: ResponseMode,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn head(url: impl Into<String>) -> Self {
        Self::new(Method::HEAD, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_response_mode(mut self, mode: ResponseMode) -> Self {
        self.response_mode = mode;
        self
    }

    pub fn plain(self) -> Self {
        self.with_response_mode(ResponseMode::Plain)
    }

    pub fn json(self) -> Self {
        self.with_response_mode(ResponseMode::Json)
    }

    pub fn json_array(self) -> Self {
        self.with_response_mode(ResponseMode::JsonArray)
    }

    pub fn binary(self, target: impl AsRef<Path>) -> Self {
        self.with_response_mode(ResponseMode::Binary(target.as_ref().to_path_buf()))
    }
}

/// Decoded response body.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResponseContent {
    /// Nothing usable was read: a non-2xx status, an empty body, or a body
    /// that did not decode in the requested mode.
    #[default]
    Absent,
    Text(String),
    Json(serde_json::Value),
    JsonArray(Vec<serde_json::Value>),
    /// The body was written to this file.
    File(PathBuf),
}

impl ResponseContent {
    pub fn is_absent(&self) -> bool {
        matches!(self, ResponseContent::Absent)
    }
}

/// HTTP response from a request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Status text (e.g., "OK", "Not Found")
    pub status_text: String,

    /// Response headers
    pub headers: HashMap<String, String>,

    pub content: ResponseContent,
}

impl HttpResponse {
    /// Response with the canonical reason phrase for `status` and no headers.
    pub fn new(status: u16, content: ResponseContent) -> Self {
        let status_text = http::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("Unknown")
            .to_string();

        Self {
            status,
            status_text,
            headers: HashMap::new(),
            content,
        }
    }

    /// Check if the response status indicates success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the response status indicates a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if the response status indicates a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            ResponseContent::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn json(&self) -> Option<&serde_json::Value> {
        match &self.content {
            ResponseContent::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn json_array(&self) -> Option<&[serde_json::Value]> {
        match &self.content {
            ResponseContent::JsonArray(values) => Some(values),
            _ => None,
        }
    }

    pub fn file(&self) -> Option<&Path> {
        match &self.content {
            ResponseContent::File(path) => Some(path),
            _ => None,
        }
    }
}
