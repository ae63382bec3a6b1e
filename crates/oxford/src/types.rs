//! Option bags and response models for the Oxford services.
//!
//! Field names follow Rust conventions and map to the service's camelCase
//! wire names through serde.

use serde::{Deserialize, Serialize};

fn flag(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

// === Options ===

/// Optional face attributes to compute during detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetectOptions {
    pub analyzes_face_landmarks: bool,
    pub analyzes_age: bool,
    pub analyzes_gender: bool,
    pub analyzes_head_pose: bool,
}

impl DetectOptions {
    pub fn all() -> Self {
        Self {
            analyzes_face_landmarks: true,
            analyzes_age: true,
            analyzes_gender: true,
            analyzes_head_pose: true,
        }
    }

    /// Every flag is sent, as `true` or `false`.
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            (
                "analyzesFaceLandmarks".to_string(),
                flag(self.analyzes_face_landmarks),
            ),
            ("analyzesAge".to_string(), flag(self.analyzes_age)),
            ("analyzesGender".to_string(), flag(self.analyzes_gender)),
            ("analyzesHeadPose".to_string(), flag(self.analyzes_head_pose)),
        ]
    }
}

/// Thumbnail dimensions and cropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThumbnailOptions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Crop around the detected region of interest
    pub smart_cropping: bool,
}

impl Default for ThumbnailOptions {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            smart_cropping: false,
        }
    }
}

impl ThumbnailOptions {
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("width".to_string(), self.width.to_string()),
            ("height".to_string(), self.height.to_string()),
            ("smartCropping".to_string(), flag(self.smart_cropping)),
        ]
    }
}

/// OCR language and orientation detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OcrOptions {
    /// BCP-47 language code; `unk` lets the service detect it
    pub language: String,
    pub detect_orientation: bool,
}

impl Default for OcrOptions {
    fn default() -> Self {
        Self {
            language: "unk".to_string(),
            detect_orientation: true,
        }
    }
}

impl OcrOptions {
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("language".to_string(), self.language.clone()),
            ("detectOrientation".to_string(), flag(self.detect_orientation)),
        ]
    }
}

/// Restricts emotion recognition to known face rectangles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmotionOptions {
    pub face_rectangles: Vec<FaceRectangle>,
}

impl EmotionOptions {
    /// `faceRectangles` is always sent; empty lets the service detect faces.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let value = self
            .face_rectangles
            .iter()
            .map(|r| format!("{},{},{},{}", r.left, r.top, r.width, r.height))
            .collect::<Vec<_>>()
            .join(";");
        vec![("faceRectangles".to_string(), value)]
    }
}

// === Face models ===

/// Pixel rectangle of a face within an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceRectangle {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// Optional attributes computed for a detected face.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_pose: Option<serde_json::Value>,
}

/// One face found by detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedFace {
    /// Identifier usable by similarity, grouping, identification and verification
    pub face_id: String,

    pub face_rectangle: FaceRectangle,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_landmarks: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<FaceAttributes>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarFace {
    pub face_id: String,
}

/// Faces divided into similarity groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingResult {
    #[serde(default)]
    pub groups: Vec<Vec<String>>,

    /// Faces not similar to any other candidate
    #[serde(default)]
    pub messy_group: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyCandidate {
    pub person_id: String,
    pub confidence: f64,
}

/// Candidate persons for one query face, best match first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyResult {
    pub face_id: String,

    #[serde(default)]
    pub candidates: Vec<IdentifyCandidate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResult {
    pub is_identical: bool,
    pub confidence: f64,
}

// === Person and person group models ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonGroup {
    pub person_group_id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub user_data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub person_id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub face_ids: Vec<String>,

    #[serde(default)]
    pub user_data: Option<String>,
}

/// A face enrolled on a person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonFace {
    pub face_id: String,

    #[serde(default)]
    pub user_data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatedPerson {
    pub person_id: String,
}

/// Training state of a person group.
///
/// Fields other than `status` (timestamps, failure messages) are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingStatus {
    pub status: String,

    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl TrainingStatus {
    pub const RUNNING: &'static str = "running";

    pub fn is_running(&self) -> bool {
        self.status == Self::RUNNING
    }

    /// The full status document, as the service sent it.
    pub fn into_value(self) -> serde_json::Value {
        let mut map = self.details;
        map.insert("status".to_string(), serde_json::Value::String(self.status));
        serde_json::Value::Object(map)
    }
}
