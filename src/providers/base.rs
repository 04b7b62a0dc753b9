use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::streaming::GenerationChunk;
use super::types::message::Message;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// Outcome of a non-streamed call that reached the API.
#[derive(Debug, Clone)]
pub enum Reply {
    /// The `content` of the first choice's message, as returned.
    Success { content: Value, usage: Usage },
    /// Non-success status with the error code and message the API reported.
    Failure { code: String, message: String },
}

/// Optional request parameters. Unset fields are left out of the payload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Parameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asr_options: Option<AsrOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_search: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_options: Option<SearchOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_thinking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incremental_output: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AsrOptions {
    pub language: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOptions {
    pub search_strategy: String,
    pub enable_source: bool,
}

pub type ChunkStream = Box<dyn Iterator<Item = Result<GenerationChunk>> + Send>;

/// Base trait for model providers
pub trait Provider {
    /// Create a provider instance from environment variables
    fn from_env() -> Result<Self>
    where
        Self: Sized;

    /// Send one multimodal request and wait for the whole reply.
    /// Transport failures are `Err`; API-level failures are `Reply::Failure`.
    fn complete(&self, model: &str, messages: &[Message], parameters: &Parameters)
        -> Result<Reply>;

    /// Open a streamed text-generation request. Errors here mean the stream never started.
    fn stream(
        &self,
        model: &str,
        messages: &[Message],
        parameters: &Parameters,
    ) -> Result<ChunkStream>;
}
