// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the generative-text service. Never recovered inside a run.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("request to generation service failed: {0}")]
    Request(String),

    #[error("generation service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("generation service is rate limiting requests")]
    RateLimited,

    #[error("failed to parse generation response: {0}")]
    Parse(String),

    #[error("generation service returned no completions")]
    EmptyCompletion,
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Request(err.to_string())
    }
}

/// Failures of a single literature query. Recovered per query by the fetcher.
#[derive(Error, Debug)]
pub enum LiteratureError {
    #[error("request to literature service failed: {0}")]
    Request(String),

    #[error("literature service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed literature response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for LiteratureError {
    fn from(err: reqwest::Error) -> Self {
        LiteratureError::Request(err.to_string())
    }
}

