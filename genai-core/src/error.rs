use genai_llm::{is_connection_error, LlmError, StructuredOutputError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("missing configuration: {0}")]
    MissingConfig(String),
    #[error("LLM error: {0}")]
    Llm(LlmError),
    #[error("tool error: {0}")]
    Tool(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("maximum iterations reached ({0})")]
    MaxIterationsReached(usize),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("structured output error: {0}")]
    Structured(#[from] StructuredOutputError),
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<LlmError> for DemoError {
    fn from(error: LlmError) -> Self {
        DemoError::Llm(error)
    }
}

impl DemoError {
    /// The endpoint could not be reached at all (server down, wrong port, no network)
    pub fn is_unreachable(&self) -> bool {
        match self {
            DemoError::Llm(e) => is_connection_error(e),
            _ => false,
        }
    }
}
