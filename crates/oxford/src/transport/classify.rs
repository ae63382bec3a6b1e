//! Response classification.
//!
//! Maps a raw response to what the invoker should do with it: hand back a
//! payload, treat the resource as absent, back off and retry, or fail.

use super::retry::parse_retry_after;
use super::RawResponse;
use crate::error::Result;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};

/// Successful call outcome.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Parsed JSON document
    Json(serde_json::Value),
    /// Image bytes
    Binary(Vec<u8>),
    /// Response with an unrecognized content type, left unparsed
    Raw(RawResponse),
    /// No payload (empty body or resource not found)
    Empty,
}

impl Payload {
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Json(_) => "json",
            Payload::Binary(_) => "binary",
            Payload::Raw(_) => "raw",
            Payload::Empty => "empty",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::Empty)
    }
}

/// What a single response means for the call.
#[derive(Debug)]
pub enum Classification {
    Payload(Payload),
    NotFound,
    Throttled {
        retry_after: Option<u64>,
        body: String,
    },
    Failed {
        status: u16,
        body: String,
    },
}

/// Classify a response by status code, then by headers.
///
/// Fails only when a JSON content type carries a body that does not parse.
pub fn classify(response: RawResponse) -> Result<Classification> {
    match response.status {
        429 => Ok(Classification::Throttled {
            retry_after: parse_retry_after(&response.headers),
            body: response.text(),
        }),
        200 | 201 => classify_payload(response).map(Classification::Payload),
        404 => Ok(Classification::NotFound),
        status => Ok(Classification::Failed {
            status,
            body: response.text(),
        }),
    }
}

fn classify_payload(response: RawResponse) -> Result<Payload> {
    let content_length = response
        .headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    if content_length == Some(0) {
        return Ok(Payload::Empty);
    }

    let content_type = response
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_ascii_lowercase);

    match content_type {
        Some(ct) if ct.contains("application/json") => {
            if response.body.is_empty() {
                Ok(Payload::Empty)
            } else {
                Ok(Payload::Json(serde_json::from_slice(&response.body)?))
            }
        }
        Some(ct) if ct.contains("image") => Ok(Payload::Binary(response.body)),
        _ => Ok(Payload::Raw(response)),
    }
}
