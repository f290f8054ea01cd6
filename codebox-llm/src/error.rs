use thiserror::Error;

/// Detailed error types for LLM integration
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type LlmResult<T> = Result<T, LlmError>;
