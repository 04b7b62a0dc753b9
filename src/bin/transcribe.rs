use std::path::PathBuf;

use clap::Parser;

use qwen_skills::cli::{exit_with_error, init_logging, parse_args, provider_or_exit, with_spinner};
use qwen_skills::skills::transcriber::{model_from_env, transcribe_audio};

/// Transcribe audio files using Qwen ASR
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the audio file
    audio_path: PathBuf,

    /// Language hint (e.g., 'zh' for Chinese, 'en' for English)
    #[arg(short, long)]
    language: Option<String>,
}

fn main() {
    let cli: Cli = parse_args();
    init_logging();

    let provider = provider_or_exit();
    let model = model_from_env();

    let result = with_spinner("transcribing", || {
        transcribe_audio(&provider, &cli.audio_path, cli.language.as_deref(), &model)
    });
    match result {
        Ok(text) => println!("{}", text),
        Err(err) => exit_with_error("Error transcribing audio", &err),
    }
}
