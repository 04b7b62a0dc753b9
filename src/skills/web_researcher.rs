//! Agentic web research: one streamed request with search and thinking turned on.
//! Only answer text is kept; reasoning is dropped.

use anyhow::Result;
use tracing::{debug, info};

use crate::errors::SkillError;
use crate::providers::{
    base::{ChunkStream, Parameters, Provider, SearchOptions},
    streaming::{GenerationChunk, SearchSource},
    types::message::Message,
};

pub const RESEARCH_MODEL: &str = "qwen3-max-2026-01-23";
pub const SEARCH_STRATEGY: &str = "agent_max";

pub fn research_parameters() -> Parameters {
    Parameters {
        result_format: Some("message".to_string()),
        enable_search: Some(true),
        search_options: Some(SearchOptions {
            search_strategy: SEARCH_STRATEGY.to_string(),
            enable_source: true,
        }),
        enable_thinking: Some(true),
        incremental_output: Some(true),
        ..Default::default()
    }
}

/// Open the research stream. An error here means the call never got going.
pub fn start_research<P: Provider>(provider: &P, query: &str) -> Result<ChunkStream> {
    let messages = [Message::user(query)?];
    info!(model = RESEARCH_MODEL, "starting web research");
    provider.stream(RESEARCH_MODEL, &messages, &research_parameters())
}

/// Concatenate the answer text of every chunk, in arrival order.
///
/// Fails with the first stream error, or with `SkillError::NoAnswer` when the
/// stream ends without any answer text.
pub fn collect_answer<I>(chunks: I) -> Result<String>
where
    I: IntoIterator<Item = Result<GenerationChunk>>,
{
    let mut answer = String::new();
    let mut sources: Vec<SearchSource> = Vec::new();

    for chunk in chunks {
        let chunk = chunk?;

        for source in chunk.sources.iter() {
            if !sources.iter().any(|s| s.url == source.url) {
                debug!(index = ?source.index, title = %source.title, url = %source.url, "search source");
                sources.push(source.clone());
            }
        }

        if chunk.is_empty() {
            continue;
        }
        // reasoning text is dropped
        if !chunk.answer.is_empty() {
            if answer.is_empty() {
                debug!("reasoning finished, collecting answer");
            }
            answer.push_str(&chunk.answer);
        }
    }

    if answer.is_empty() {
        return Err(SkillError::NoAnswer.into());
    }
    info!(chars = answer.len(), sources = sources.len(), "research complete");
    Ok(answer)
}
