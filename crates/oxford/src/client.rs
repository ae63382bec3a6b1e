//! Composite client: one credential and one invoker behind every endpoint
//! client.

use crate::api::{
    ApiContext, EmotionClient, FaceClient, PersonClient, PersonGroupClient, VisionClient,
};
use crate::config::Config;
use crate::error::{OxfordError, Result};
use crate::transport::{Credential, HttpTransport, Invoker, RetryPolicy, Transport};
use std::sync::Arc;

/// Entry point to the Oxford services.
///
/// Cloning is cheap; clones share the underlying HTTP connection pool.
#[derive(Clone)]
pub struct Client {
    face: FaceClient,
    vision: VisionClient,
    emotion: EmotionClient,
}

impl Client {
    /// Create a client with the default configuration and the given key.
    ///
    /// Fails with `InvalidCredential` for an empty key, before any request.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let credential = Credential::new(key)?;
        let config = Config::default();
        let transport = HttpTransport::new(config.api.timeout())?;
        Ok(Self::with_transport(credential, Arc::new(transport), &config))
    }

    /// Create a client from a loaded configuration. The key may be given as a
    /// `${ENV_VAR}` reference.
    pub fn from_config(config: &Config) -> Result<Self> {
        let key = config
            .api
            .resolved_key()
            .ok_or(OxfordError::InvalidCredential)?;
        let credential = Credential::new(key)?;
        let transport = HttpTransport::new(config.api.timeout())?;
        Ok(Self::with_transport(credential, Arc::new(transport), config))
    }

    /// Create a client over a custom transport.
    pub fn with_transport(
        credential: Credential,
        transport: Arc<dyn Transport>,
        config: &Config,
    ) -> Self {
        tracing::debug!(
            base_url = %config.api.base_url,
            transport = transport.name(),
            max_retries = config.retry.max_retries,
            "Initializing Oxford client v{}",
            crate::VERSION
        );

        let invoker = Invoker::new(
            transport,
            credential,
            RetryPolicy::from_config(&config.retry),
        );
        let ctx = ApiContext::new(Arc::new(invoker), &config.api.base_url);

        Self {
            face: FaceClient::new(ctx.clone(), config.training.clone()),
            vision: VisionClient::new(ctx.clone()),
            emotion: EmotionClient::new(ctx),
        }
    }

    pub fn face(&self) -> &FaceClient {
        &self.face
    }

    pub fn vision(&self) -> &VisionClient {
        &self.vision
    }

    pub fn emotion(&self) -> &EmotionClient {
        &self.emotion
    }

    /// Shortcut for `face().person()`.
    pub fn person(&self) -> &PersonClient {
        self.face.person()
    }

    /// Shortcut for `face().person_group()`.
    pub fn person_group(&self) -> &PersonGroupClient {
        self.face.person_group()
    }
}
