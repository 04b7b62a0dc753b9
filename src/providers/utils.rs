use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::StatusCode;
use serde_json::Value;

use super::base::Usage;
use crate::errors::SkillError;

pub const DEFAULT_AUDIO_MIME: &str = "audio/mpeg";
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

const AUDIO_MIME_TYPES: &[(&str, &str)] = &[
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("m4a", "audio/mp4"),
    ("ogg", "audio/ogg"),
    ("opus", "audio/opus"),
    ("aac", "audio/aac"),
    ("flac", "audio/flac"),
    ("webm", "audio/webm"),
];

const IMAGE_MIME_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
];

/// Which extension table to consult when encoding a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Image,
}

impl MediaKind {
    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            MediaKind::Audio => AUDIO_MIME_TYPES,
            MediaKind::Image => IMAGE_MIME_TYPES,
        }
    }

    fn default_mime(self) -> &'static str {
        match self {
            MediaKind::Audio => DEFAULT_AUDIO_MIME,
            MediaKind::Image => DEFAULT_IMAGE_MIME,
        }
    }

    /// Name used in "not found" diagnostics.
    fn noun(self) -> &'static str {
        match self {
            MediaKind::Audio => "Audio file",
            MediaKind::Image => "Image",
        }
    }

    /// MIME type for `path`, matched case-insensitively on the extension.
    pub fn mime_type(self, path: &Path) -> &'static str {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        ext.and_then(|ext| {
            self.table()
                .iter()
                .find(|(candidate, _)| *candidate == ext)
                .map(|(_, mime)| *mime)
        })
        .unwrap_or_else(|| self.default_mime())
    }
}

/// `data:<mime>;base64,<payload>`
pub fn to_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Read a local file and encode it as a data URI.
/// A missing path yields `SkillError::FileNotFound` before any read is attempted.
pub fn file_to_data_uri(path: &Path, kind: MediaKind) -> Result<String> {
    if !path.exists() {
        return Err(SkillError::FileNotFound {
            what: kind.noun(),
            path: path.display().to_string(),
        }
        .into());
    }

    let mime_type = kind.mime_type(path);
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(to_data_uri(mime_type, &bytes))
}

/// Pull `output.choices[0].message.content` out of a success body.
pub fn response_content(response: &Value) -> Result<Value> {
    response
        .pointer("/output/choices/0/message/content")
        .cloned()
        .ok_or_else(|| anyhow!("Response has no output.choices[0].message.content"))
}

/// Text to print for a message's content: the first part's `text` when the
/// content is a non-empty list, the string itself when it is a string, and the
/// JSON rendering otherwise.
pub fn content_text(content: &Value) -> String {
    match content {
        Value::Array(parts) if !parts.is_empty() => parts[0]
            .get("text")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| content.to_string()),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Build the `(code, message)` pair for a non-success response body.
pub fn api_error(status: StatusCode, body: &str) -> (String, String) {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|v| v.get(name))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let code = field("code").unwrap_or_else(|| status.as_u16().to_string());
    let message = field("message")
        .or_else(|| (!body.trim().is_empty() && parsed.is_none()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

    (code, message)
}

pub fn format_api_error(code: &str, message: &str) -> String {
    format!("API Error {}: {}", code, message)
}

pub fn get_usage(data: &Value) -> Usage {
    let Some(usage) = data.get("usage") else {
        return Usage::default();
    };

    let field = |name: &str| {
        usage
            .get(name)
            .and_then(Value::as_i64)
            .and_then(|v| i32::try_from(v).ok())
    };
    let input_tokens = field("input_tokens");
    let output_tokens = field("output_tokens");
    let total_tokens = field("total_tokens").or(match (input_tokens, output_tokens) {
        (Some(input), Some(output)) => Some(input + output),
        _ => None,
    });

    Usage::new(input_tokens, output_tokens, total_tokens)
}
