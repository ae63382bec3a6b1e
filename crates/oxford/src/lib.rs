//! Oxford - Client library for the Project Oxford cognitive services.
//!
//! Wraps the face, vision and emotion REST APIs behind typed async clients.
//! Every call goes through one invoker that attaches the subscription key,
//! retries throttled (HTTP 429) responses after the server's `retry-after`
//! hint, and classifies the response body by content type.
//!
//! # Architecture
//!
//! ```text
//! Client → FaceClient / VisionClient / EmotionClient
//!        → request builder (image source → body) → Invoker → Transport
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use oxford::{Client, DetectOptions, ImageSource};
//!
//! #[tokio::main]
//! async fn main() -> oxford::Result<()> {
//!     let client = Client::new(std::env::var("OXFORD_API_KEY").unwrap_or_default())?;
//!
//!     let faces = client
//!         .face()
//!         .detect(ImageSource::path("./face.jpg"), &DetectOptions::all())
//!         .await?;
//!     println!("Found {} faces", faces.len());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

// Re-exports for convenient access
pub use api::{EmotionClient, FaceClient, PersonClient, PersonGroupClient, VisionClient};
pub use client::Client;
pub use config::Config;
pub use error::{ConfigError, OxfordError, Result};
pub use transport::{
    Credential, HttpTransport, ImageSource, Invoker, Payload, RawResponse, RequestDescriptor,
    RetryPolicy, Transport, VisualFeatures,
};
pub use types::{
    DetectOptions, DetectedFace, EmotionOptions, FaceRectangle, GroupingResult, IdentifyResult,
    OcrOptions, Person, PersonFace, PersonGroup, SimilarFace, ThumbnailOptions, TrainingStatus,
    VerifyResult,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
