// Vertex AI connection of the Gemini engine
mod vertex;

pub use vertex::{ServiceInitializer, VertexInitializer, VertexTarget};

#[cfg(test)]
pub use vertex::MockServiceInitializer;

use crate::error::AppError;
use crate::time_tool;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use genai::{
    Client,
    chat::{ChatMessage, ChatRequest, ChatResponse, MessageContent, ToolCall, ToolResponse},
};
use serde_json::{Value, json};
use tracing::{Instrument, debug, error, info, span};

/// Agent's core identity and instructions
const HEPHAESTUS_INSTRUCTION: &str = "You are Hephaestus, the first Execution Agent of the ARGO Empire, designation Hephaestus-Alpha. Your purpose is to execute user commands by selecting and running the correct tool from your arsenal. Be precise and efficient. State the result of the tool execution directly.";

/// Upper bound of model round-trips answered with tool calls for a single command
const MAX_TOOL_ROUNDS: usize = 8;

/// Tool calls of one model turn executed at the same time
const TOOL_CONCURRENCY: usize = 3;

/// An externally hosted reasoning engine.
///
/// `query` returns an associative response; a successful answer carries the
/// model text under the `output` key.
#[async_trait]
pub trait ReasoningEngine: Send + Sync {
    async fn query(&self, input: &str) -> Result<Value, AppError>;
}

/// Gemini chat model armed with the time tool.
pub struct GeminiEngine {
    client: Client,
    model: String,
}

/// Outcome of a single model round-trip
enum Turn {
    /// The model answered with text (or with nothing at all)
    Answered(Option<String>),
    /// The model called tools; the request now holds their responses
    ToolsCalled(ChatRequest),
}

impl GeminiEngine {
    pub fn new(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Keep calling the model until it stops asking for tools.
    async fn call_loop(&self, mut chat_req: ChatRequest) -> Result<Option<String>, AppError> {
        for round in 1..=MAX_TOOL_ROUNDS {
            match self.make_call(chat_req).await? {
                Turn::Answered(text) => return Ok(text),
                Turn::ToolsCalled(next) => {
                    debug!(round, "Tool call response detected, making another call to the model");
                    chat_req = next;
                }
            }
        }

        error!("Model kept requesting tools, giving up");
        Err(AppError::ToolLoopExhausted(MAX_TOOL_ROUNDS))
    }

    /// Make a call to the model and process the response.
    async fn make_call(&self, chat_req: ChatRequest) -> Result<Turn, AppError> {
        debug!("Sending request to the model: {:?}", chat_req.messages);
        let response: ChatResponse = self
            .client
            .exec_chat(&self.model, chat_req.clone(), None)
            .await?;

        match response.content {
            Some(MessageContent::Text(text)) => Ok(Turn::Answered(Some(text.trim().to_string()))),
            Some(MessageContent::ToolCalls(tool_calls)) => {
                // remember the tool calls to append them to the chat request
                let chat_req = chat_req.append_message(ChatMessage::assistant(
                    MessageContent::ToolCalls(tool_calls.clone()),
                ));

                let tool_responses: Vec<ToolResponse> = stream::iter(tool_calls)
                    .map(|tool_call| async move { make_tool_call(tool_call) })
                    .buffer_unordered(TOOL_CONCURRENCY)
                    .collect()
                    .await;

                debug!("Tool calls: {:#?}", tool_responses);

                Ok(Turn::ToolsCalled(
                    tool_responses
                        .into_iter()
                        .fold(chat_req, |chat_req, next| chat_req.append_message(next)),
                ))
            }
            Some(_) => {
                error!("Unsupported response type from the model");
                Err(AppError::Engine("Unsupported response type".to_string()))
            }
            None => {
                error!("No response from the model");
                Ok(Turn::Answered(None))
            }
        }
    }
}

#[async_trait]
impl ReasoningEngine for GeminiEngine {
    async fn query(&self, input: &str) -> Result<Value, AppError> {
        let chat_req = ChatRequest::default()
            .with_system(HEPHAESTUS_INSTRUCTION)
            .with_tools(vec![time_tool::tool()])
            .append_message(ChatMessage::user(input.to_string()));

        let answer = self
            .call_loop(chat_req)
            .instrument(span!(tracing::Level::INFO, "call_loop", model = %self.model))
            .await?;

        Ok(match answer {
            Some(text) => json!({ "output": text }),
            None => json!({}),
        })
    }
}

/// Dispatch a tool call by function name.
fn run_tool(fn_name: &str, args: &Value) -> Result<Value, AppError> {
    match fn_name {
        time_tool::TOOL_NAME => time_tool::call(args),
        other => Err(AppError::UnsupportedToolCall(other.to_string())),
    }
}

/// Make a tool call; failures are reported back to the model instead of aborting.
fn make_tool_call(tool_call: ToolCall) -> ToolResponse {
    info!(
        "Tool call: \n\tFunction: {}\n\tArguments: {}",
        tool_call.fn_name, tool_call.fn_arguments
    );

    let content = match run_tool(&tool_call.fn_name, &tool_call.fn_arguments) {
        Ok(value) => value,
        Err(e) => {
            error!("Failed to make tool call: {}", e);
            json!({ "error": e.to_string() })
        }
    };

    ToolResponse::new(tool_call.call_id, content.to_string())
}
