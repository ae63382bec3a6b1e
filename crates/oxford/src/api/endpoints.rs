//! Static table of remote endpoints.
//!
//! Each endpoint is a verb plus a path template relative to the configured
//! base URL. `{name}` segments are substituted (percent-encoded) per call.

use reqwest::Method;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    pub fn method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Patch => Method::PATCH,
            Verb::Delete => Method::DELETE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub verb: Verb,
    pub path: &'static str,
}

impl Endpoint {
    const fn new(verb: Verb, path: &'static str) -> Self {
        Self { verb, path }
    }

    /// Absolute URL with every `{name}` placeholder replaced.
    pub fn url(&self, base_url: &str, params: &[(&str, &str)]) -> String {
        let mut path = self.path.to_string();
        for (name, value) in params {
            path = path.replace(&format!("{{{name}}}"), &urlencoding::encode(value));
        }
        format!("{}{}", base_url.trim_end_matches('/'), path)
    }
}

const PERSON_GROUP: &str = "/face/v0/persongroups/{personGroupId}";
const TRAINING: &str = "/face/v0/persongroups/{personGroupId}/training";
const PERSONS: &str = "/face/v0/persongroups/{personGroupId}/persons";
const PERSON: &str = "/face/v0/persongroups/{personGroupId}/persons/{personId}";
const PERSON_FACE: &str =
    "/face/v0/persongroups/{personGroupId}/persons/{personId}/faces/{faceId}";

// Face
pub const DETECT: Endpoint = Endpoint::new(Verb::Post, "/face/v0/detections");
pub const FIND_SIMILAR: Endpoint = Endpoint::new(Verb::Post, "/face/v0/findsimilars");
pub const GROUPING: Endpoint = Endpoint::new(Verb::Post, "/face/v0/groupings");
pub const IDENTIFY: Endpoint = Endpoint::new(Verb::Post, "/face/v0/identifications");
pub const VERIFY: Endpoint = Endpoint::new(Verb::Post, "/face/v0/verifications");

// Person groups
pub const PERSON_GROUP_LIST: Endpoint = Endpoint::new(Verb::Get, "/face/v0/persongroups");
pub const PERSON_GROUP_CREATE: Endpoint = Endpoint::new(Verb::Put, PERSON_GROUP);
pub const PERSON_GROUP_GET: Endpoint = Endpoint::new(Verb::Get, PERSON_GROUP);
pub const PERSON_GROUP_UPDATE: Endpoint = Endpoint::new(Verb::Patch, PERSON_GROUP);
pub const PERSON_GROUP_DELETE: Endpoint = Endpoint::new(Verb::Delete, PERSON_GROUP);
pub const TRAINING_START: Endpoint = Endpoint::new(Verb::Post, TRAINING);
pub const TRAINING_STATUS: Endpoint = Endpoint::new(Verb::Get, TRAINING);

// Persons
pub const PERSON_LIST: Endpoint = Endpoint::new(Verb::Get, PERSONS);
pub const PERSON_CREATE: Endpoint = Endpoint::new(Verb::Post, PERSONS);
pub const PERSON_GET: Endpoint = Endpoint::new(Verb::Get, PERSON);
pub const PERSON_UPDATE: Endpoint = Endpoint::new(Verb::Patch, PERSON);
pub const PERSON_DELETE: Endpoint = Endpoint::new(Verb::Delete, PERSON);
pub const PERSON_FACE_ADD: Endpoint = Endpoint::new(Verb::Put, PERSON_FACE);
pub const PERSON_FACE_GET: Endpoint = Endpoint::new(Verb::Get, PERSON_FACE);
pub const PERSON_FACE_UPDATE: Endpoint = Endpoint::new(Verb::Patch, PERSON_FACE);
pub const PERSON_FACE_DELETE: Endpoint = Endpoint::new(Verb::Delete, PERSON_FACE);

// Vision
pub const ANALYZE: Endpoint = Endpoint::new(Verb::Post, "/vision/v1/analyses");
pub const THUMBNAIL: Endpoint = Endpoint::new(Verb::Post, "/vision/v1/thumbnails");
pub const OCR: Endpoint = Endpoint::new(Verb::Post, "/vision/v1/ocr");

// Emotion
pub const EMOTION_RECOGNIZE: Endpoint = Endpoint::new(Verb::Post, "/emotion/v1.0/recognize");
