//! Blocking server-sent-events reader for streamed generation responses.
//!
//! The API emits events like
//!
//! ```text
//! id:1
//! event:result
//! :HTTP_STATUS/200
//! data:{"output":{"choices":[{"message":{"content":"","reasoning_content":"Let"}}]}}
//! ```
//!
//! separated by blank lines. [`SseReader`] turns a `BufRead` into events and
//! [`decode_chunk`] turns one event into a [`GenerationChunk`].

use std::io::BufRead;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;

use super::utils::format_api_error;

/// One raw server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub event: Option<String>,
    pub data: String,
}

/// A web page the model cited while searching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSource {
    pub index: Option<i64>,
    pub title: String,
    pub url: String,
}

/// One incremental piece of a streamed reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationChunk {
    pub reasoning: String,
    pub answer: String,
    pub sources: Vec<SearchSource>,
}

impl GenerationChunk {
    pub fn reasoning(text: &str) -> Self {
        Self {
            reasoning: text.to_string(),
            ..Default::default()
        }
    }

    pub fn answer(text: &str) -> Self {
        Self {
            answer: text.to_string(),
            ..Default::default()
        }
    }

    /// Neither reasoning nor answer text.
    pub fn is_empty(&self) -> bool {
        self.reasoning.is_empty() && self.answer.is_empty()
    }
}

pub struct SseReader<R> {
    reader: R,
    done: bool,
}

impl<R: BufRead> SseReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for SseReader<R> {
    type Item = Result<SseEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut event = None;
        let mut data: Vec<String> = Vec::new();
        let mut line = String::new();

        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => {
                    self.done = true;
                    // flush a final event that was not followed by a blank line
                    return (!data.is_empty()).then(|| {
                        Ok(SseEvent {
                            event,
                            data: data.join("\n"),
                        })
                    });
                }
                Ok(_) => {}
                Err(e) => {
                    self.done = true;
                    let err = anyhow::Error::new(e).context("Failed to read from event stream");
                    return Some(Err(err));
                }
            }

            let line = line.trim_end_matches(&['\r', '\n'][..]);
            if line.is_empty() {
                if data.is_empty() {
                    event = None;
                    continue;
                }
                return Some(Ok(SseEvent {
                    event,
                    data: data.join("\n"),
                }));
            }
            if line.starts_with(':') {
                continue;
            }

            let (field, value) = match line.split_once(':') {
                Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
                None => (line, ""),
            };
            match field {
                "event" => event = Some(value.to_string()),
                "data" => data.push(value.to_string()),
                _ => {}
            }
        }
    }
}

/// Decode one event into a chunk. Error events, and payloads that carry an
/// error code instead of output, become `Err`.
pub fn decode_chunk(event: &SseEvent) -> Result<GenerationChunk> {
    let payload: Value = serde_json::from_str(&event.data)
        .with_context(|| format!("Invalid stream chunk: {}", event.data))?;

    let code = payload
        .get("code")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty());
    if event.event.as_deref() == Some("error") || (code.is_some() && payload.get("output").is_none())
    {
        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error");
        return Err(anyhow!(format_api_error(code.unwrap_or("unknown"), message)));
    }

    let text = |pointer: &str| {
        payload
            .pointer(pointer)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    Ok(GenerationChunk {
        reasoning: text("/output/choices/0/message/reasoning_content"),
        answer: text("/output/choices/0/message/content"),
        sources: search_sources(&payload),
    })
}

fn search_sources(payload: &Value) -> Vec<SearchSource> {
    payload
        .pointer("/output/search_info/search_results")
        .and_then(Value::as_array)
        .map(|results| {
            results
                .iter()
                .filter_map(|r| {
                    Some(SearchSource {
                        index: r.get("index").and_then(Value::as_i64),
                        title: r.get("title").and_then(Value::as_str).unwrap_or_default().to_string(),
                        url: r.get("url").and_then(Value::as_str)?.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Decode every event of an SSE body into chunks.
pub fn chunks<R: BufRead>(reader: R) -> impl Iterator<Item = Result<GenerationChunk>> {
    SseReader::new(reader).map(|event| event.and_then(|event| decode_chunk(&event)))
}
