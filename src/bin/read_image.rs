use std::path::PathBuf;

use clap::Parser;

use qwen_skills::cli::{exit_with_error, init_logging, parse_args, provider_or_exit, with_spinner};
use qwen_skills::skills::image_reader::{analyze_image, model_from_env, DEFAULT_PROMPT};

/// Analyze an image with a Qwen vision model
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:\n  read_image math.jpg \"Solve this math problem\"\n  read_image document.png \"Extract all text\"\n  read_image photo.jpg")]
struct Cli {
    /// Path to the image file
    image_path: PathBuf,

    /// Question or instruction about the image
    #[arg(default_value = DEFAULT_PROMPT)]
    prompt: String,
}

fn main() {
    let cli: Cli = parse_args();
    init_logging();

    let provider = provider_or_exit();
    let model = model_from_env();

    let result = with_spinner("reading image", || {
        analyze_image(&provider, &cli.image_path, &cli.prompt, &model)
    });
    match result {
        Ok(text) => println!("{}", text),
        Err(err) => exit_with_error("Error analyzing image", &err),
    }
}
