use serde::{Deserialize, Serialize};

/// One part of a multimodal message. Serializes as a single-key object,
/// e.g. `{"audio": "data:audio/mpeg;base64,..."}` or `{"text": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentPart {
    Audio(String),
    Image(String),
    Text(String),
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text(text.into())
    }

    pub fn summary(&self) -> String {
        match self {
            ContentPart::Audio(uri) => format!("content:audio ({} bytes)", uri.len()),
            ContentPart::Image(uri) => format!("content:image ({} bytes)", uri.len()),
            ContentPart::Text(text) => format!("content:text\n{}", text),
        }
    }
}

/// Message content is either a bare string or a list of parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}
