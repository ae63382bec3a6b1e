//! The invoker: one chokepoint for sending, classifying and retrying calls.

use super::classify::{classify, Classification, Payload};
use super::retry::RetryPolicy;
use super::{RequestDescriptor, Transport};
use crate::error::{OxfordError, Result};
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Header carrying the subscription key on every request.
pub const SUBSCRIPTION_KEY_HEADER: &str = "ocp-apim-subscription-key";

/// Validated, non-empty subscription key.
#[derive(Clone, Debug)]
pub struct Credential(SecretString);

impl Credential {
    /// Fails with `InvalidCredential` for an empty key or one that cannot be
    /// sent as a header value.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() || HeaderValue::from_str(&key).is_err() {
            return Err(OxfordError::InvalidCredential);
        }
        Ok(Self(SecretString::from(key)))
    }

    fn header_value(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(self.0.expose_secret())
            .map_err(|_| OxfordError::InvalidCredential)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

/// Sends requests through a transport and turns responses into payloads.
///
/// Throttled responses are retried in an iterative loop: the invoker sleeps
/// for the server's `retry-after` hint and reissues the identical request,
/// until the retry ceiling is passed.
pub struct Invoker {
    transport: Arc<dyn Transport>,
    credential: Credential,
    policy: RetryPolicy,
}

impl Invoker {
    pub fn new(transport: Arc<dyn Transport>, credential: Credential, policy: RetryPolicy) -> Self {
        Self {
            transport,
            credential,
            policy,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Issue the request and classify the response.
    ///
    /// 404 resolves to [`Payload::Empty`]. Statuses other than
    /// 200/201/404/429 fail with `RemoteError`.
    pub async fn invoke(&self, mut request: RequestDescriptor) -> Result<Payload> {
        request
            .headers
            .insert(SUBSCRIPTION_KEY_HEADER, self.credential.header_value()?);

        let mut retries = 0u32;
        loop {
            tracing::debug!(
                method = %request.method,
                url = %request.url,
                attempt = retries + 1,
                transport = self.transport.name(),
                "Sending request"
            );

            let response = self.transport.send(&request).await?;
            match classify(response)? {
                Classification::Payload(payload) => {
                    tracing::debug!(kind = payload.kind(), "Request succeeded");
                    return Ok(payload);
                }
                Classification::NotFound => {
                    tracing::debug!(url = %request.url, "Resource not found");
                    return Ok(Payload::Empty);
                }
                Classification::Throttled { retry_after, body } => {
                    if !self.policy.should_retry(retries) {
                        tracing::warn!(
                            url = %request.url,
                            retries,
                            "Throttled past the retry ceiling, giving up"
                        );
                        return Err(OxfordError::RetryExhausted {
                            retries: self.policy.max_retries,
                            body,
                        });
                    }
                    let delay = self.policy.backoff(retry_after);
                    tracing::warn!(
                        url = %request.url,
                        retry = retries + 1,
                        max_retries = self.policy.max_retries,
                        delay_secs = delay.as_secs(),
                        "Throttled, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    retries += 1;
                }
                Classification::Failed { status, body } => {
                    return Err(OxfordError::RemoteError { status, body });
                }
            }
        }
    }

    /// Invoke and decode a JSON payload. Empty resolves to `None`.
    pub async fn invoke_json<T: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
    ) -> Result<Option<T>> {
        match self.invoke(request).await? {
            Payload::Json(value) => Ok(Some(serde_json::from_value(value)?)),
            Payload::Empty => Ok(None),
            other => Err(OxfordError::UnexpectedPayload {
                expected: "json",
                found: other.kind(),
            }),
        }
    }

    /// Invoke and return image bytes. Empty resolves to `None`.
    ///
    /// A response with an unrecognized content type yields its raw body.
    pub async fn invoke_binary(&self, request: RequestDescriptor) -> Result<Option<Vec<u8>>> {
        match self.invoke(request).await? {
            Payload::Binary(bytes) => Ok(Some(bytes)),
            Payload::Raw(raw) => Ok(Some(raw.body)),
            Payload::Empty => Ok(None),
            other => Err(OxfordError::UnexpectedPayload {
                expected: "binary",
                found: other.kind(),
            }),
        }
    }

    /// Invoke for side effects only; any successful payload is discarded.
    pub async fn invoke_unit(&self, request: RequestDescriptor) -> Result<()> {
        self.invoke(request).await.map(|_| ())
    }
}
