//! Request invocation layer shared by every endpoint client.
//!
//! Every API call funnels through here: the request builder turns an image
//! source into a concrete request, the invoker sends it through a
//! [`Transport`], classifies the response and retries throttled calls.

pub(crate) mod classify;
pub(crate) mod features;
pub(crate) mod http;
pub(crate) mod invoker;
pub(crate) mod request;
pub(crate) mod retry;

pub use classify::Payload;
pub use features::VisualFeatures;
pub use http::HttpTransport;
pub use invoker::{Credential, Invoker};
pub use request::ImageSource;
pub use retry::RetryPolicy;

use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;

pub(crate) const JSON_CONTENT_TYPE: &str = "application/json";
pub(crate) const OCTET_STREAM_CONTENT_TYPE: &str = "application/octet-stream";

/// Body of an outbound request.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    Bytes(Vec<u8>),
}

/// A fully assembled request, valid for one call.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: Body,
}

impl RequestDescriptor {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: Body::Empty,
        }
    }

    /// Attach a JSON body and the matching content type.
    pub fn with_json(mut self, value: serde_json::Value) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        self.body = Body::Json(value);
        self
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query.extend(query);
        self
    }

    /// Look up a header value as text.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Look up a query parameter value.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Status, headers and body bytes of a response, before classification.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Body decoded as (lossy) UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends one request and returns the unclassified response.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (the invoker holds an `Arc<dyn Transport>`).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Transport name for logging.
    fn name(&self) -> &str;

    /// Issue the request once. Only transport-level failures are errors here;
    /// every HTTP status comes back as a `RawResponse`.
    async fn send(&self, request: &RequestDescriptor) -> Result<RawResponse>;
}
