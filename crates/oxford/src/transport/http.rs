//! HTTP transport backed by `reqwest`.

use super::{Body, RawResponse, RequestDescriptor, Transport};
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Default transport: one pooled `reqwest::Client` shared by every call.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client (custom proxies, TLS roots, ...).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "reqwest"
    }

    async fn send(&self, request: &RequestDescriptor) -> Result<RawResponse> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(request.headers.clone());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match &request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.body(serde_json::to_vec(value)?),
            Body::Bytes(bytes) => builder.body(bytes.clone()),
        };

        let resp = builder.send().await?;

        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
