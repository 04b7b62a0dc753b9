use std::path::Path;

use anyhow::Result;
use tracing::info;

use super::render_reply;
use crate::providers::{
    base::{Parameters, Provider},
    configs::base::env_or_default,
    types::{content::ContentPart, message::Message},
    utils::{file_to_data_uri, MediaKind},
};

pub const DEFAULT_VL_MODEL: &str = "qwen3-vl-plus";
pub const VL_MODEL_ENV: &str = "QWEN_VL_MODEL";
pub const DEFAULT_PROMPT: &str = "Describe what you see in this image";

pub fn model_from_env() -> String {
    env_or_default(VL_MODEL_ENV, DEFAULT_VL_MODEL)
}

/// Ask the vision model about a local image. The image goes first, the prompt second.
///
/// Same contract as [`transcribe_audio`](super::transcriber::transcribe_audio):
/// API and transport failures come back as printable text.
pub fn analyze_image<P: Provider>(
    provider: &P,
    image_path: &Path,
    prompt: &str,
    model: &str,
) -> Result<String> {
    let image = file_to_data_uri(image_path, MediaKind::Image)?;
    let messages = [Message::user_parts(vec![
        ContentPart::Image(image),
        ContentPart::text(prompt),
    ])?];

    info!(path = %image_path.display(), model, "analyzing image");
    Ok(render_reply(provider.complete(model, &messages, &Parameters::default())))
}
