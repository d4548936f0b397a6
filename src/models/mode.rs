use serde::{Deserialize, Serialize};
use std::fmt;

/// The active input category. Exactly one is selected per attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GenerationMode {
    #[default]
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "url")]
    Url,
    #[serde(rename = "social")]
    Social,
    #[serde(rename = "imageUrl")]
    ImageReference,
}

impl GenerationMode {
    /// Name used by the rendering service for the `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Text => "text",
            GenerationMode::Url => "url",
            GenerationMode::Social => "social",
            GenerationMode::ImageReference => "imageUrl",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" => Some(GenerationMode::Text),
            "url" => Some(GenerationMode::Url),
            "social" => Some(GenerationMode::Social),
            "imageurl" | "image" => Some(GenerationMode::ImageReference),
            _ => None,
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
