//! Request builder for image-bearing calls.
//!
//! Turns an [`ImageSource`] into a concrete request body and content type:
//! a JSON `{"url": ...}` document for remote images, raw octet-stream bytes
//! for local files and in-memory buffers.

use super::{Body, RequestDescriptor, JSON_CONTENT_TYPE, OCTET_STREAM_CONTENT_TYPE};
use crate::error::{OxfordError, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use std::path::{Path, PathBuf};

const NO_SOURCE: &str = "no image source supplied";

/// The image a call operates on. Exactly one source per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Publicly reachable image URL, fetched by the service
    Url(String),
    /// Local file, uploaded as raw bytes
    Path(PathBuf),
    /// In-memory image bytes
    Stream(Vec<u8>),
}

impl ImageSource {
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn stream(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Stream(bytes.into())
    }

    /// Pick a source from loosely populated candidates.
    ///
    /// The first populated candidate wins, in the order url, path, stream.
    /// Empty strings count as not populated.
    pub fn from_candidates(
        url: Option<&str>,
        path: Option<&Path>,
        stream: Option<Vec<u8>>,
    ) -> Result<Self> {
        if let Some(url) = url.filter(|u| !u.is_empty()) {
            return Ok(Self::Url(url.to_string()));
        }
        if let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) {
            return Ok(Self::Path(path.to_path_buf()));
        }
        if let Some(bytes) = stream {
            return Ok(Self::Stream(bytes));
        }
        Err(OxfordError::InvalidSource(NO_SOURCE.to_string()))
    }

    /// Short name of the variant, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Url(_) => "url",
            Self::Path(_) => "path",
            Self::Stream(_) => "stream",
        }
    }
}

/// Build the request for an image-bearing call.
///
/// Fails with `InvalidSource` for an empty url or path, before any I/O.
/// A local file is read in full here; the handle is closed before this returns.
pub async fn build(
    method: Method,
    url: impl Into<String>,
    source: ImageSource,
    extra_headers: HeaderMap,
    query: Vec<(String, String)>,
) -> Result<RequestDescriptor> {
    let (content_type, body) = match source {
        ImageSource::Url(image_url) if !image_url.is_empty() => (
            JSON_CONTENT_TYPE,
            Body::Json(serde_json::json!({ "url": image_url })),
        ),
        ImageSource::Path(path) if !path.as_os_str().is_empty() => {
            let bytes = tokio::fs::read(&path).await?;
            tracing::debug!("Read {} bytes from {:?}", bytes.len(), path);
            (OCTET_STREAM_CONTENT_TYPE, Body::Bytes(bytes))
        }
        ImageSource::Stream(bytes) => (OCTET_STREAM_CONTENT_TYPE, Body::Bytes(bytes)),
        _ => return Err(OxfordError::InvalidSource(NO_SOURCE.to_string())),
    };

    let mut request = RequestDescriptor::new(method, url).with_query(query);
    request.headers.extend(extra_headers);
    request
        .headers
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    request.body = body;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TARGET: &str = "https://api.projectoxford.ai/face/v0/detections";

    #[tokio::test]
    async fn test_url_source_builds_json_body() {
        let request = build(
            Method::POST,
            TARGET,
            ImageSource::url("https://example.com/face.jpg"),
            HeaderMap::new(),
            vec![],
        )
        .await
        .unwrap();

        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(
            request.body,
            Body::Json(serde_json::json!({"url": "https://example.com/face.jpg"}))
        );
    }

    #[tokio::test]
    async fn test_path_source_reads_file_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

        let request = build(
            Method::POST,
            TARGET,
            ImageSource::path(file.path()),
            HeaderMap::new(),
            vec![],
        )
        .await
        .unwrap();

        assert_eq!(
            request.header("content-type"),
            Some("application/octet-stream")
        );
        assert_eq!(request.body, Body::Bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]));
    }

    #[tokio::test]
    async fn test_stream_source_passes_bytes_through() {
        let request = build(
            Method::POST,
            TARGET,
            ImageSource::stream(vec![1, 2, 3]),
            HeaderMap::new(),
            vec![("language".to_string(), "en".to_string())],
        )
        .await
        .unwrap();

        assert_eq!(
            request.header("content-type"),
            Some("application/octet-stream")
        );
        assert_eq!(request.body, Body::Bytes(vec![1, 2, 3]));
        assert_eq!(request.query_param("language"), Some("en"));
    }

    #[tokio::test]
    async fn test_empty_url_is_invalid_source() {
        let err = build(
            Method::POST,
            TARGET,
            ImageSource::url(""),
            HeaderMap::new(),
            vec![],
        )
        .await
        .unwrap_err();
        assert!(matches!(err, OxfordError::InvalidSource(_)));
    }

    #[tokio::test]
    async fn test_empty_path_is_invalid_source() {
        let err = build(
            Method::POST,
            TARGET,
            ImageSource::path(""),
            HeaderMap::new(),
            vec![],
        )
        .await
        .unwrap_err();
        assert!(matches!(err, OxfordError::InvalidSource(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = build(
            Method::POST,
            TARGET,
            ImageSource::path(dir.path().join("missing.jpg")),
            HeaderMap::new(),
            vec![],
        )
        .await
        .unwrap_err();
        assert!(matches!(err, OxfordError::Io(_)));
    }

    #[tokio::test]
    async fn test_extra_headers_are_kept() {
        let mut extra = HeaderMap::new();
        extra.insert("x-trace", HeaderValue::from_static("abc"));
        let request = build(
            Method::POST,
            TARGET,
            ImageSource::stream(vec![0]),
            extra,
            vec![],
        )
        .await
        .unwrap();
        assert_eq!(request.header("x-trace"), Some("abc"));
    }

    #[test]
    fn test_candidates_prefer_url_then_path_then_stream() {
        let path = Path::new("/tmp/face.jpg");

        let source =
            ImageSource::from_candidates(Some("http://a/b.jpg"), Some(path), Some(vec![1]))
                .unwrap();
        assert_eq!(source, ImageSource::url("http://a/b.jpg"));

        let source = ImageSource::from_candidates(Some(""), Some(path), Some(vec![1])).unwrap();
        assert_eq!(source, ImageSource::path("/tmp/face.jpg"));

        let source =
            ImageSource::from_candidates(None, Some(Path::new("")), Some(vec![1])).unwrap();
        assert_eq!(source, ImageSource::stream(vec![1]));
    }

    #[test]
    fn test_no_candidates_is_invalid_source() {
        let err = ImageSource::from_candidates(None, None, None).unwrap_err();
        assert!(err.to_string().contains("no image source supplied"));
    }
}
