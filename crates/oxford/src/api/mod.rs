//! Resource-scoped endpoint clients.
//!
//! Each client is a thin mapping from typed arguments to an endpoint
//! descriptor plus a JSON body or query; all of them share one [`Invoker`].

pub mod endpoints;

mod emotion;
mod face;
mod person;
mod person_group;
mod vision;

pub use emotion::EmotionClient;
pub use face::FaceClient;
pub use person::PersonClient;
pub use person_group::PersonGroupClient;
pub use vision::VisionClient;

use crate::error::Result;
use crate::transport::{request, ImageSource, Invoker, RequestDescriptor};
use endpoints::Endpoint;
use reqwest::header::HeaderMap;
use std::sync::Arc;

/// State shared by every endpoint client of one composite client.
#[derive(Clone)]
pub(crate) struct ApiContext {
    pub invoker: Arc<Invoker>,
    pub base_url: Arc<str>,
}

impl ApiContext {
    pub fn new(invoker: Arc<Invoker>, base_url: &str) -> Self {
        Self {
            invoker,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    /// Request without a body.
    pub fn request(&self, endpoint: &Endpoint, params: &[(&str, &str)]) -> RequestDescriptor {
        RequestDescriptor::new(endpoint.verb.method(), endpoint.url(&self.base_url, params))
    }

    /// Request with a serialized JSON body.
    pub fn json_request<B: serde::Serialize>(
        &self,
        endpoint: &Endpoint,
        params: &[(&str, &str)],
        body: &B,
    ) -> Result<RequestDescriptor> {
        Ok(self
            .request(endpoint, params)
            .with_json(serde_json::to_value(body)?))
    }

    /// Request carrying an image source.
    pub async fn image_request(
        &self,
        endpoint: &Endpoint,
        source: ImageSource,
        query: Vec<(String, String)>,
    ) -> Result<RequestDescriptor> {
        tracing::debug!(source = source.kind(), path = endpoint.path, "Building image request");
        request::build(
            endpoint.verb.method(),
            endpoint.url(&self.base_url, &[]),
            source,
            HeaderMap::new(),
            query,
        )
        .await
    }
}
