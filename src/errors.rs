use thiserror::Error;

/// Failures the binaries report differently from a generic error.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkillError {
    #[error("DASHSCOPE_API_KEY environment variable not set.")]
    MissingApiKey,

    #[error("{what} not found: {path}")]
    FileNotFound { what: &'static str, path: String },

    #[error("No answer generated.")]
    NoAnswer,
}
