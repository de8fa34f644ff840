//! HTTP execution abstraction.
//!
//! Stores talk to an [`HttpExecutor`] rather than to reqwest directly so that
//! tests can substitute canned or in-memory responses without network calls.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tempfile::NamedTempFile;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::types::{Body, HttpRequest, HttpResponse, Method, ResponseContent, ResponseMode};

/// Trait for executing HTTP requests.
///
/// Implementations can use real HTTP clients or mock responses for testing.
pub trait HttpExecutor: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// `Err` means the exchange itself failed (connection, I/O). Any status
    /// code the server sent back, including errors, is an `Ok` response.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error>;
}

/// Decode a response body according to the request's response mode.
///
/// Non-2xx bodies are never decoded and a binary target is only replaced
/// after the full body was received.
/// Bodies that cannot be read or parsed come back as
/// [`ResponseContent::Absent`].
pub fn decode_content<R: Read>(mode: &ResponseMode, status: u16, mut body: R) -> ResponseContent {
    if !(200..300).contains(&status) {
        return ResponseContent::Absent;
    }

    if let ResponseMode::Binary(target) = mode {
        return match write_to_file(target, &mut body) {
            Ok(()) => ResponseContent::File(target.clone()),
            Err(e) => {
                debug!(target = %target.display(), error = %e, "could not write response body");
                ResponseContent::Absent
            }
        };
    }

    let mut text = String::new();
    if let Err(e) = body.read_to_string(&mut text) {
        debug!(error = %e, "could not read response body");
        return ResponseContent::Absent;
    }

    match mode {
        ResponseMode::Json => match serde_json::from_str(&text) {
            Ok(value) => ResponseContent::Json(value),
            Err(_) => ResponseContent::Absent,
        },
        ResponseMode::JsonArray => match serde_json::from_str(&text) {
            Ok(serde_json::Value::Array(values)) => ResponseContent::JsonArray(values),
            _ => ResponseContent::Absent,
        },
        _ => ResponseContent::Text(text),
    }
}

/// The body lands in a temporary file beside `target`, which only replaces
/// `target` once the whole body was read.
fn write_to_file<R: Read>(target: &Path, body: &mut R) -> io::Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    io::copy(body, &mut file)?;
    file.as_file().sync_all()?;
    file.persist(target).map_err(|e| e.error)?;
    Ok(())
}

/// Production HTTP executor using reqwest.
///
/// One blocking call per request: no timeout, no idle connection reuse.
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    pub fn new() -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(None)
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self { client })
    }

    /// Create an executor around a preconfigured reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpExecutor for ReqwestExecutor {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let url = Url::parse(&request.url)?;
        let method: http::Method = request.method.into();

        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let header_name = HeaderName::try_from(name.as_str())?;
            let header_value = HeaderValue::try_from(value.as_str())?;
            headers.insert(header_name, header_value);
        }

        let mut req_builder = self.client.request(method, url);
        req_builder = req_builder.headers(headers);

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        req_builder = match &request.body {
            Body::Empty if request.method == Method::PUT => req_builder.body(Vec::new()),
            Body::Empty => req_builder,
            Body::Bytes(bytes) => req_builder.body(bytes.clone()),
            Body::File(path) => req_builder.body(File::open(path)?),
        };

        debug!(method = ?request.method, url = %request.url, "sending request");
        let response = req_builder.send()?;

        let status = response.status().as_u16();
        let status_text = response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string();

        let mut resp_headers = std::collections::HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                resp_headers.insert(name.to_string(), v.to_string());
            }
        }
        debug!(status, url = %request.url, "received response");

        let content = decode_content(&request.response_mode, status, response);

        Ok(HttpResponse {
            status,
            status_text,
            headers: resp_headers,
            content,
        })
    }
}

/// Mock HTTP executor for testing.
///
/// Returns predefined responses based on request matching.
#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// A mock HTTP executor that returns predefined responses.
    #[derive(Clone, Default)]
    pub struct MockExecutor {
        /// Responses keyed by method and URL.
        responses: Arc<Mutex<HashMap<(Method, String), HttpResponse>>>,
        /// Default response when no match found.
        default_response: Arc<Mutex<Option<HttpResponse>>>,
        /// Recorded requests for verification.
        recorded_requests: Arc<Mutex<Vec<HttpRequest>>>,
        /// Error message returned for every request, if set.
        failure: Arc<Mutex<Option<String>>>,
    }

    impl MockExecutor {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a response for a specific method and URL.
        pub fn with_response(
            self,
            method: Method,
            url: impl Into<String>,
            response: HttpResponse,
        ) -> Self {
            self.responses
                .lock()
                .unwrap()
                .insert((method, url.into()), response);
            self
        }

        /// Set a default response when nothing matches.
        pub fn with_default_response(self, response: HttpResponse) -> Self {
            *self.default_response.lock().unwrap() = Some(response);
            self
        }

        /// Configure to fail all requests with a transport error.
        pub fn fail_with(self, message: impl Into<String>) -> Self {
            *self.failure.lock().unwrap() = Some(message.into());
            self
        }

        pub fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.recorded_requests.lock().unwrap().clone()
        }

        pub fn clear_recorded(&self) {
            self.recorded_requests.lock().unwrap().clear();
        }

        /// A response with the given status and no body.
        pub fn status(status: u16) -> HttpResponse {
            HttpResponse::new(status, ResponseContent::Absent)
        }

        pub fn json_response(status: u16, body: serde_json::Value) -> HttpResponse {
            HttpResponse::new(status, ResponseContent::Json(body))
        }

        pub fn json_array_response(body: Vec<serde_json::Value>) -> HttpResponse {
            HttpResponse::new(200, ResponseContent::JsonArray(body))
        }

        pub fn not_found() -> HttpResponse {
            Self::status(404)
        }
    }

    impl HttpExecutor for MockExecutor {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
            self.recorded_requests.lock().unwrap().push(request.clone());

            if let Some(message) = self.failure.lock().unwrap().clone() {
                return Err(Error::Transport { message });
            }

            let responses = self.responses.lock().unwrap();
            if let Some(response) = responses.get(&(request.method, request.url.clone())) {
                return Ok(response.clone());
            }

            if let Some(ref response) = *self.default_response.lock().unwrap() {
                return Ok(response.clone());
            }

            Ok(Self::not_found())
        }
    }
}
