use crate::engine::VertexTarget;
use crate::error::AppError;
use std::time::Duration;

/// Model driving the agent unless overridden
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-001";

/// Per-command limit on the reasoning call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Agent configuration, resolved once by the caller and passed into initialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Google Cloud project identifier
    pub project_id: Option<String>,
    /// Vertex AI region (e.g., "us-central1")
    pub location: Option<String>,
    /// Gemini model name passed to the chat API
    pub model: String,
    /// `None` lets a command wait for the engine indefinitely
    pub timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_id: None,
            location: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl Settings {
    /// Checks that both required values are present and non-empty.
    pub fn vertex_target(&self) -> Result<VertexTarget, AppError> {
        let present = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

        match (present(&self.project_id), present(&self.location)) {
            (Some(project_id), Some(location)) => Ok(VertexTarget {
                project_id,
                location,
                model: self.model.clone(),
            }),
            _ => Err(AppError::MissingConfig),
        }
    }
}
