use std::io::BufReader;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use serde::Serialize;
use tracing::debug;

use super::{
    base::{ChunkStream, Parameters, Provider, Reply},
    configs::base::ProviderConfig,
    configs::dashscope::DashScopeProviderConfig,
    streaming,
    types::message::Message,
    utils::{api_error, format_api_error, get_usage, response_content},
};

pub const MULTIMODAL_PATH: &str = "services/aigc/multimodal-generation/generation";
pub const TEXT_GENERATION_PATH: &str = "services/aigc/text-generation/generation";

#[derive(Serialize)]
struct RequestBody<'a> {
    model: &'a str,
    input: Input<'a>,
    parameters: &'a Parameters,
}

#[derive(Serialize)]
struct Input<'a> {
    messages: &'a [Message],
}

pub struct DashScopeProvider {
    client: Client,
    config: DashScopeProviderConfig,
}

impl DashScopeProvider {
    pub fn new(config: DashScopeProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.host.trim_end_matches('/'), path)
    }

    fn post(&self, path: &str, body: &RequestBody<'_>, sse: bool) -> Result<Response> {
        let url = self.url(path);
        let messages = body
            .input
            .messages
            .iter()
            .map(Message::summary)
            .collect::<Vec<_>>()
            .join("\n");
        debug!(url = %url, model = body.model, sse, messages = %messages, "sending request");

        let mut request = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(body);
        if sse {
            request = request
                .header("X-DashScope-SSE", "enable")
                .header(ACCEPT, "text/event-stream");
        }

        request
            .send()
            .with_context(|| format!("Request to {} failed", url))
    }
}

impl Provider for DashScopeProvider {
    fn from_env() -> Result<Self> {
        let config = DashScopeProviderConfig::from_env()?;
        Self::new(config)
    }

    fn complete(
        &self,
        model: &str,
        messages: &[Message],
        parameters: &Parameters,
    ) -> Result<Reply> {
        let body = RequestBody {
            model,
            input: Input { messages },
            parameters,
        };
        let response = self.post(MULTIMODAL_PATH, &body, false)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            let (code, message) = api_error(status, &text);
            debug!(status = status.as_u16(), code = %code, "request rejected");
            return Ok(Reply::Failure { code, message });
        }

        let data: serde_json::Value = response.json().context("Response is not valid JSON")?;
        let content = response_content(&data)?;
        let usage = get_usage(&data);
        debug!(?usage, "multimodal call complete");

        Ok(Reply::Success { content, usage })
    }

    fn stream(
        &self,
        model: &str,
        messages: &[Message],
        parameters: &Parameters,
    ) -> Result<ChunkStream> {
        let body = RequestBody {
            model,
            input: Input { messages },
            parameters,
        };
        let response = self.post(TEXT_GENERATION_PATH, &body, true)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            let (code, message) = api_error(status, &text);
            return Err(anyhow!(format_api_error(&code, &message)));
        }

        Ok(Box::new(streaming::chunks(BufReader::new(response))))
    }
}
