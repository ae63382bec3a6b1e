//! Visual feature flags for image analysis.

use serde::{Deserialize, Serialize};

/// Query parameter carrying the selected features.
pub const VISUAL_FEATURES_PARAM: &str = "visualFeatures";

/// Selectable visual features of the analysis endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VisualFeatures {
    /// Clipart / line drawing detection
    pub image_type: bool,
    /// Accent and dominant colors, black & white detection
    pub color: bool,
    /// Face coordinates, gender and age
    pub faces: bool,
    /// Adult content detection
    pub adult: bool,
    /// Image categorization
    pub categories: bool,
}

impl VisualFeatures {
    /// Wire names in the order they are emitted.
    pub const NAMES: [&'static str; 5] = ["ImageType", "Color", "Faces", "Adult", "Categories"];

    pub fn all() -> Self {
        Self {
            image_type: true,
            color: true,
            faces: true,
            adult: true,
            categories: true,
        }
    }

    /// Build from loosely named flags.
    ///
    /// Unrecognized names and false values are ignored.
    pub fn from_flags<I, K>(flags: I) -> Self
    where
        I: IntoIterator<Item = (K, bool)>,
        K: AsRef<str>,
    {
        let mut features = Self::default();
        for (name, enabled) in flags {
            if !enabled {
                continue;
            }
            match name.as_ref() {
                "ImageType" => features.image_type = true,
                "Color" => features.color = true,
                "Faces" => features.faces = true,
                "Adult" => features.adult = true,
                "Categories" => features.categories = true,
                other => tracing::debug!("Ignoring unrecognized visual feature '{other}'"),
            }
        }
        features
    }

    fn enabled(&self) -> [bool; 5] {
        [
            self.image_type,
            self.color,
            self.faces,
            self.adult,
            self.categories,
        ]
    }

    /// Comma-joined names of the enabled features, or `None` if nothing is enabled.
    pub fn to_query_value(&self) -> Option<String> {
        let names: Vec<&str> = Self::NAMES
            .iter()
            .zip(self.enabled())
            .filter(|(_, on)| *on)
            .map(|(name, _)| *name)
            .collect();

        if names.is_empty() {
            None
        } else {
            Some(names.join(","))
        }
    }

    /// Query parameters for the analysis call; empty when nothing is enabled.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.to_query_value()
            .map(|value| vec![(VISUAL_FEATURES_PARAM.to_string(), value)])
            .unwrap_or_default()
    }
}
