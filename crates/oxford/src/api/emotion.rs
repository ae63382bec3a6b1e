//! Emotion recognition.

use super::endpoints;
use super::ApiContext;
use crate::error::Result;
use crate::transport::ImageSource;
use crate::types::EmotionOptions;

/// Client for the emotion API.
#[derive(Clone)]
pub struct EmotionClient {
    ctx: ApiContext,
}

impl EmotionClient {
    pub(crate) fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    /// Recognize the emotions expressed by each face in an image, with the
    /// bounding box of every face. Returns one entry per face.
    pub async fn recognize(
        &self,
        source: ImageSource,
        options: &EmotionOptions,
    ) -> Result<Vec<serde_json::Value>> {
        let request = self
            .ctx
            .image_request(&endpoints::EMOTION_RECOGNIZE, source, options.to_query())
            .await?;
        Ok(self.ctx.invoker.invoke_json(request).await?.unwrap_or_default())
    }
}
