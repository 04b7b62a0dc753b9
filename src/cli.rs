//! Process plumbing shared by the `transcribe`, `read_image` and `research` binaries.
//!
//! stdout only ever carries results; every diagnostic goes to stderr.

use std::fmt::Display;
use std::process;

use clap::Parser;
use cliclack::spinner;
use console::{style, StyledObject, Term};
use tracing_subscriber::EnvFilter;

use crate::errors::SkillError;
use crate::providers::base::Provider;
use crate::providers::dashscope::DashScopeProvider;

/// Parse arguments. `--help`/`--version` exit 0, any other argument error exits 1.
pub fn parse_args<T: Parser>() -> T {
    T::try_parse().unwrap_or_else(|err| {
        let code = if err.use_stderr() { 1 } else { 0 };
        let _ = err.print();
        process::exit(code)
    })
}

/// Logs go to stderr at `warn` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Build the provider from the environment, or explain how to set the key and exit 1.
pub fn provider_or_exit() -> DashScopeProvider {
    DashScopeProvider::from_env().unwrap_or_else(|err| {
        match err.downcast_ref::<SkillError>() {
            Some(SkillError::MissingApiKey) => {
                eprintln!("{} {}", label("Error"), err);
                eprintln!("Please set your DashScope API key:");
                eprintln!("  export DASHSCOPE_API_KEY='your-api-key-here'");
            }
            _ => eprintln!("{} {:#}", label("Error"), err),
        }
        process::exit(1)
    })
}

/// Report a fatal error on stderr and exit 1.
///
/// Missing files keep the plain `Error:` prefix and an empty research result prints
/// its own message; everything else is prefixed with `context`.
pub fn exit_with_error(context: &str, err: &anyhow::Error) -> ! {
    match err.downcast_ref::<SkillError>() {
        Some(SkillError::NoAnswer) => eprintln!("{}", err),
        Some(SkillError::FileNotFound { .. }) => eprintln!("{} {}", label("Error"), err),
        _ => eprintln!("{} {:#}", label(context), err),
    }
    process::exit(1)
}

/// Run `work` behind a spinner when stderr is a terminal.
pub fn with_spinner<T>(message: &str, work: impl FnOnce() -> T) -> T {
    if !Term::stderr().is_term() {
        return work();
    }

    let spin = spinner();
    spin.start(message);
    let result = work();
    spin.stop("");
    result
}

fn label(text: impl Display) -> StyledObject<String> {
    style(format!("{}:", text)).for_stderr().red().bold()
}
