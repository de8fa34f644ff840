//! # hubic-http
//!
//! Blocking HTTP request builder used by the Hubic storage backend.
//!
//! A request is an immutable [`HttpRequest`] value: start from a URL, chain
//! headers, query parameters, a body and a response mode, then hand it to an
//! [`HttpExecutor`].
//!
//! ```ignore
//! use hubic_http::{HttpExecutor, HttpRequest, ReqwestExecutor};
//!
//! let executor = ReqwestExecutor::new()?;
//! let request = HttpRequest::get("https://storage.example.com/default")
//!     .with_header("X-Auth-Token", token)
//!     .with_query("format", "json")
//!     .json_array();
//!
//! let response = executor.execute(&request)?;
//! if response.status == 200 {
//!     for entry in response.json_array().unwrap_or_default() {
//!         println!("{}", entry["name"]);
//!     }
//! }
//! ```
//!
//! Error statuses are ordinary responses. Their bodies are not decoded, so
//! callers check [`HttpResponse::status`] before looking at the content.

pub mod error;
pub mod executor;
pub mod types;

pub use error::Error;
pub use executor::{decode_content, HttpExecutor, ReqwestExecutor};
pub use types::{Body, HttpRequest, HttpResponse, Method, ResponseContent, ResponseMode};
