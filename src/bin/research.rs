use clap::Parser;

use qwen_skills::cli::{exit_with_error, init_logging, parse_args, provider_or_exit, with_spinner};
use qwen_skills::skills::web_researcher::{collect_answer, start_research};

/// Research a question on the web with Qwen and print only the final answer
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Example:\n  research \"Latest AI developments 2025\"")]
struct Cli {
    /// Your research question
    query: String,
}

fn main() {
    let cli: Cli = parse_args();
    init_logging();

    let provider = provider_or_exit();

    let outcome = with_spinner("researching", || {
        start_research(&provider, &cli.query).map(collect_answer)
    });
    match outcome {
        Err(err) => exit_with_error("Error calling DashScope API", &err),
        Ok(Err(err)) => exit_with_error("Error reading DashScope stream", &err),
        Ok(Ok(text)) => println!("{}", text),
    }
}
