use anyhow::{anyhow, Result};
use std::sync::Mutex;

use super::base::{ChunkStream, Parameters, Provider, Reply};
use super::streaming::GenerationChunk;
use super::types::message::Message;

/// Scripted reply for `MockProvider::stream`.
pub enum MockStream {
    Chunks(Vec<Result<GenerationChunk>>),
    Refused(String),
}

/// A mock provider that returns pre-configured responses and records every request.
pub struct MockProvider {
    reply: Mutex<Option<Result<Reply>>>,
    stream: Mutex<Option<MockStream>>,
    requests: Mutex<Vec<(String, Vec<Message>, Parameters)>>,
}

impl MockProvider {
    pub fn with_reply(reply: Result<Reply>) -> Self {
        Self {
            reply: Mutex::new(Some(reply)),
            stream: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_stream(stream: MockStream) -> Self {
        Self {
            reply: Mutex::new(None),
            stream: Mutex::new(Some(stream)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(String, Vec<Message>, Parameters)> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, model: &str, messages: &[Message], parameters: &Parameters) {
        self.requests
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec(), parameters.clone()));
    }
}

impl Provider for MockProvider {
    fn from_env() -> Result<Self> {
        Err(anyhow!("MockProvider cannot be built from the environment"))
    }

    fn complete(
        &self,
        model: &str,
        messages: &[Message],
        parameters: &Parameters,
    ) -> Result<Reply> {
        self.record(model, messages, parameters);
        self.reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(anyhow!("no reply configured")))
    }

    fn stream(
        &self,
        model: &str,
        messages: &[Message],
        parameters: &Parameters,
    ) -> Result<ChunkStream> {
        self.record(model, messages, parameters);
        match self.stream.lock().unwrap().take() {
            Some(MockStream::Chunks(chunks)) => Ok(Box::new(chunks.into_iter())),
            Some(MockStream::Refused(message)) => Err(anyhow!(message)),
            None => Err(anyhow!("no stream configured")),
        }
    }
}
