use std::time::Duration;
use thiserror::Error;

/// Custom error types for the hephaestus agent
#[derive(Error, Debug)]
pub enum AppError {
    /// Error when `PROJECT_ID` or `LOCATION` is absent
    #[error("Please set PROJECT_ID and LOCATION in your .env file.")]
    MissingConfig,

    /// Error when the reasoning engine cannot be constructed
    #[error("Failed to construct reasoning engine: {0}")]
    EngineInit(String),

    /// Error when a tool call argument has the wrong type
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error when a tool call function is not implemented
    #[error("Tool call function not implemented: {0}")]
    UnsupportedToolCall(String),

    /// Error when the model keeps asking for tools without answering
    #[error("Model requested tools {0} times without answering")]
    ToolLoopExhausted(usize),

    /// Error when the reasoning engine does not answer in time
    #[error("Reasoning engine timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Failure reported by the reasoning engine, shown to the user as-is
    #[error("{0}")]
    Engine(String),

    /// Wrapper for genai client errors
    #[error(transparent)]
    GenaiError(#[from] genai::Error),

    /// Wrapper for JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
