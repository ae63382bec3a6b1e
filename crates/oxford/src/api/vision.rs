//! Image analysis, thumbnailing and OCR.

use super::endpoints;
use super::ApiContext;
use crate::error::Result;
use crate::transport::{ImageSource, VisualFeatures};
use crate::types::{OcrOptions, ThumbnailOptions};

/// Client for the vision APIs.
#[derive(Clone)]
pub struct VisionClient {
    ctx: ApiContext,
}

impl VisionClient {
    pub(crate) fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    /// Extract the selected visual features from an image.
    ///
    /// With no feature enabled the `visualFeatures` parameter is omitted and
    /// the service applies its own default.
    pub async fn analyze(
        &self,
        source: ImageSource,
        features: &VisualFeatures,
    ) -> Result<Option<serde_json::Value>> {
        let request = self
            .ctx
            .image_request(&endpoints::ANALYZE, source, features.to_query())
            .await?;
        self.ctx.invoker.invoke_json(request).await
    }

    /// Generate a thumbnail, smart-cropped around the region of interest when
    /// requested. Returns the encoded image bytes.
    pub async fn thumbnail(
        &self,
        source: ImageSource,
        options: &ThumbnailOptions,
    ) -> Result<Option<Vec<u8>>> {
        let request = self
            .ctx
            .image_request(&endpoints::THUMBNAIL, source, options.to_query())
            .await?;
        self.ctx.invoker.invoke_binary(request).await
    }

    /// Detect text in an image.
    pub async fn ocr(
        &self,
        source: ImageSource,
        options: &OcrOptions,
    ) -> Result<Option<serde_json::Value>> {
        let request = self
            .ctx
            .image_request(&endpoints::OCR, source, options.to_query())
            .await?;
        self.ctx.invoker.invoke_json(request).await
    }
}
