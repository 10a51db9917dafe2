use super::{GeminiEngine, ReasoningEngine};
use crate::error::AppError;
use genai::{
    Client, ServiceTarget,
    resolver::{AuthData, Endpoint, ServiceTargetResolver},
};
use std::sync::Arc;
use tracing::info;

/// Environment variable holding the API key sent to the Vertex endpoint
const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Validated connection parameters for Vertex AI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexTarget {
    pub project_id: String,
    pub location: String,
    pub model: String,
}

impl VertexTarget {
    /// Regional publisher endpoint; the Gemini adapter appends `models/{model}:...`.
    pub fn endpoint(&self) -> String {
        format!(
            "https://{location}-aiplatform.googleapis.com/v1/projects/{project}/locations/{location}/publishers/google/",
            location = self.location,
            project = self.project_id,
        )
    }
}

/// Entry point that initializes the hosted service and builds an engine bound to it.
#[cfg_attr(test, mockall::automock)]
pub trait ServiceInitializer {
    fn connect(&self, target: &VertexTarget) -> Result<Arc<dyn ReasoningEngine>, AppError>;
}

/// Connects the Gemini engine through the Vertex AI regional endpoint.
#[derive(Debug, Default)]
pub struct VertexInitializer;

impl ServiceInitializer for VertexInitializer {
    fn connect(&self, target: &VertexTarget) -> Result<Arc<dyn ReasoningEngine>, AppError> {
        if target.project_id.trim().is_empty() || target.location.trim().is_empty() {
            return Err(AppError::EngineInit(
                "project and location must not be blank".to_string(),
            ));
        }

        let endpoint = target.endpoint();
        info!("Using Vertex AI endpoint: {}", endpoint);

        let resolver = ServiceTargetResolver::from_resolver_fn(
            move |service_target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
                let ServiceTarget { model, .. } = service_target;
                Ok(ServiceTarget {
                    endpoint: Endpoint::from_owned(endpoint.clone()),
                    auth: AuthData::from_env(API_KEY_ENV),
                    model,
                })
            },
        );

        let client = Client::builder()
            .with_service_target_resolver(resolver)
            .build();

        Ok(Arc::new(GeminiEngine::new(client, target.model.clone())))
    }
}
