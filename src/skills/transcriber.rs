use std::path::Path;

use anyhow::Result;
use tracing::info;

use super::render_reply;
use crate::providers::{
    base::{AsrOptions, Parameters, Provider},
    configs::base::env_or_default,
    types::{content::ContentPart, message::Message},
    utils::{file_to_data_uri, MediaKind},
};

pub const DEFAULT_ASR_MODEL: &str = "qwen3-asr-flash";
pub const ASR_MODEL_ENV: &str = "QWEN_ASR_MODEL";

/// Model from `QWEN_ASR_MODEL`, or the default.
pub fn model_from_env() -> String {
    env_or_default(ASR_MODEL_ENV, DEFAULT_ASR_MODEL)
}

/// Transcribe a local audio file.
///
/// Returns the text to print: the transcript, or `API Error <code>: <message>`,
/// or `Error: <message>` when the call itself failed. Only problems reading the
/// audio file are returned as `Err`, and in that case no request is made.
pub fn transcribe_audio<P: Provider>(
    provider: &P,
    audio_path: &Path,
    language: Option<&str>,
    model: &str,
) -> Result<String> {
    let audio = file_to_data_uri(audio_path, MediaKind::Audio)?;
    let messages = [Message::user_parts(vec![ContentPart::Audio(audio)])?];

    let parameters = Parameters {
        result_format: Some("message".to_string()),
        asr_options: language
            .filter(|l| !l.is_empty())
            .map(|l| AsrOptions {
                language: l.to_string(),
            }),
        ..Default::default()
    };

    info!(path = %audio_path.display(), model, language = ?language, "transcribing audio");
    Ok(render_reply(provider.complete(model, &messages, &parameters)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SkillError;
    use crate::providers::base::{Reply, Usage};
    use crate::providers::mock::MockProvider;
    use crate::providers::types::content::MessageContent;
    use anyhow::anyhow;
    use serde_json::json;
    use std::io::Write;

    fn success(text: &str) -> Result<Reply> {
        Ok(Reply::Success {
            content: json!([{ "text": text }]),
            usage: Usage::default(),
        })
    }

    fn audio_file(suffix: &str) -> Result<tempfile::NamedTempFile> {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile()?;
        file.write_all(b"RIFF")?;
        Ok(file)
    }

    #[test]
    fn test_transcribe_success() -> Result<()> {
        let file = audio_file(".wav")?;
        let provider = MockProvider::with_reply(success("hello"));

        let text = transcribe_audio(&provider, file.path(), Some("en"), "qwen3-asr-flash")?;
        assert_eq!(text, "hello");

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        let (model, messages, parameters) = &requests[0];
        assert_eq!(model, "qwen3-asr-flash");
        assert_eq!(
            messages[0].content,
            MessageContent::Parts(vec![ContentPart::Audio(
                "data:audio/wav;base64,UklGRg==".to_string()
            )])
        );
        assert_eq!(parameters.result_format.as_deref(), Some("message"));
        assert_eq!(parameters.asr_options.as_ref().map(|o| o.language.as_str()), Some("en"));
        Ok(())
    }

    #[test]
    fn test_no_language_hint_omits_asr_options() -> Result<()> {
        let file = audio_file(".mp3")?;
        let provider = MockProvider::with_reply(success("hi"));

        transcribe_audio(&provider, file.path(), None, "m")?;
        let empty_hint = MockProvider::with_reply(success("hi"));
        transcribe_audio(&empty_hint, file.path(), Some(""), "m")?;

        assert!(provider.requests()[0].2.asr_options.is_none());
        assert!(empty_hint.requests()[0].2.asr_options.is_none());
        Ok(())
    }

    #[test]
    fn test_api_error_is_printed_text() -> Result<()> {
        let file = audio_file(".ogg")?;
        let provider = MockProvider::with_reply(Ok(Reply::Failure {
            code: "400".to_string(),
            message: "bad request".to_string(),
        }));

        let text = transcribe_audio(&provider, file.path(), None, "m")?;
        assert_eq!(text, "API Error 400: bad request");
        Ok(())
    }

    #[test]
    fn test_transport_error_is_printed_text() -> Result<()> {
        let file = audio_file(".ogg")?;
        let provider = MockProvider::with_reply(Err(anyhow!("timed out")));

        let text = transcribe_audio(&provider, file.path(), None, "m")?;
        assert_eq!(text, "Error: timed out");
        Ok(())
    }

    #[test]
    fn test_missing_file_makes_no_request() {
        let provider = MockProvider::with_reply(success("never"));
        let err = transcribe_audio(&provider, Path::new("/no/such/clip.mp3"), None, "m")
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SkillError>(),
            Some(SkillError::FileNotFound { what: "Audio file", .. })
        ));
        assert!(provider.requests().is_empty());
    }
}
