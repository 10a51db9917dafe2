use crate::config::Settings;
use crate::engine::{ReasoningEngine, ServiceInitializer};
use crate::error::AppError;
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tracing::{Instrument, error, info, span};

const EMPTY_COMMAND: &str = "[INFO] Please enter a command.";
const NO_OUTPUT: &str = "No output received.";

/// Handle to a connected reasoning engine.
///
/// Also serves as the deployment wrapper: hosting platforms call [`Agent::query`].
#[derive(Clone)]
pub struct Agent {
    engine: Arc<dyn ReasoningEngine>,
    timeout: Option<Duration>,
}

impl Agent {
    pub fn new(engine: Arc<dyn ReasoningEngine>, timeout: Option<Duration>) -> Self {
        Self { engine, timeout }
    }

    /// Forwards `input` to the engine and returns its raw response.
    pub async fn query(&self, input: &str) -> Result<Value, AppError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.engine.query(input))
                .await
                .map_err(|_| AppError::Timeout(limit))?,
            None => self.engine.query(input).await,
        }
    }
}

/// Validates the settings and connects the engine.
pub fn try_initialize(
    settings: &Settings,
    initializer: &impl ServiceInitializer,
) -> Result<Agent, AppError> {
    let target = settings.vertex_target()?;

    info!(
        "Initializing Vertex AI with PROJECT_ID: {}, LOCATION: {}",
        target.project_id, target.location
    );
    info!("Forging agent 'Hephaestus-Alpha'...");
    let engine = initializer.connect(&target)?;
    info!("Agent is ready.");

    Ok(Agent::new(engine, settings.timeout))
}

/// Initializes the agent, logging any failure and returning `None` instead.
pub fn initialize(settings: &Settings, initializer: &impl ServiceInitializer) -> Option<Agent> {
    match try_initialize(settings, initializer) {
        Ok(agent) => Some(agent),
        Err(e @ AppError::MissingConfig) => {
            error!("ERROR: {}", e);
            None
        }
        Err(e) => {
            error!("[CRITICAL ERROR] Failed to initialize Hephaestus-Alpha: {}", e);
            None
        }
    }
}

/// Runs a single command and formats the outcome for the user. Never fails.
pub async fn process_command(agent: &Agent, command: &str) -> String {
    if command.trim().is_empty() {
        return EMPTY_COMMAND.to_string();
    }

    info!("...executing...");
    let response = agent
        .query(command)
        .instrument(span!(tracing::Level::INFO, "command"))
        .await;

    match response {
        Ok(response) => format!("[RESPONSE] {}", extract_output(&response)),
        Err(e) => {
            error!("Command failed: {}", e);
            format!("[ERROR] An error occurred during execution: {}", e)
        }
    }
}

// A missing or null `output` falls back to the placeholder.
fn extract_output(response: &Value) -> String {
    match response.get("output") {
        None | Some(Value::Null) => NO_OUTPUT.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
