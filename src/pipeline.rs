//! Plan, extract, execute.
//!
//! A run moves through three phases, in order and exactly once each:
//!
//! 1. **Planning** - the planner persona works on the user request, discovering tools
//!    through `search_for_tool`.
//! 2. **Extraction** - every `tool` message of the planning transcript is decoded as a
//!    [`ToolDescriptor`]; messages that don't decode are logged and skipped.
//! 3. **Execution** - an executor built from those descriptors runs on the request
//!    followed by the whole planning transcript.

use crate::agents::{build_executor, planner_agent};
use crate::error::{PlanExecError, Result};
use crate::llm::broker::DEFAULT_MAX_TURNS;
use crate::llm::gateway::CompletionConfig;
use crate::llm::{LlmBroker, LlmMessage, MessageRole, ToolDescriptor, ToolRegistry};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Pipeline configuration, read from `PLAN_EXEC_*` environment variables
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub model: String,
    pub max_turns: usize,
    pub completion: CompletionConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_turns: DEFAULT_MAX_TURNS,
            completion: CompletionConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(model) = lookup("PLAN_EXEC_MODEL").filter(|m| !m.trim().is_empty()) {
            config.model = model;
        }
        if let Some(turns) = lookup("PLAN_EXEC_MAX_TURNS") {
            config.max_turns = turns.trim().parse().map_err(|_| {
                let message = format!("PLAN_EXEC_MAX_TURNS is not a number: {}", turns);
                PlanExecError::ConfigError(message)
            })?;
            if config.max_turns == 0 {
                return Err(PlanExecError::ConfigError(
                    "PLAN_EXEC_MAX_TURNS must be at least 1".to_string(),
                ));
            }
        }

        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Planning,
    Extraction,
    Execution,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Planning => "planning",
            Phase::Extraction => "extraction",
            Phase::Execution => "execution",
        };
        f.write_str(name)
    }
}

/// Everything a pipeline run produced
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub planning: Vec<LlmMessage>,
    pub descriptors: Vec<ToolDescriptor>,
    pub execution: Vec<LlmMessage>,
}

/// Decode the tool descriptors found in a transcript's `tool` messages
///
/// Failures are not fatal: a message whose content is missing, malformed, `null`, or not
/// shaped like a descriptor is logged and skipped.
pub fn extract_tool_descriptors(transcript: &[LlmMessage]) -> Vec<ToolDescriptor> {
    transcript
        .iter()
        .filter_map(decode_tool_message)
        .filter_map(|decoded| match decoded {
            Ok(descriptor) => Some(descriptor),
            Err((content, e)) => {
                warn!(error = %e, "Unable to parse tool message as a descriptor: {}", content);
                None
            }
        })
        .collect()
}

/// Decode one message; `None` for non-tool messages, the raw content on failure
fn decode_tool_message(
    message: &LlmMessage,
) -> Option<std::result::Result<ToolDescriptor, (&str, serde_json::Error)>> {
    if message.role != MessageRole::Tool {
        return None;
    }
    let content = message.content.as_deref().unwrap_or("");
    Some(serde_json::from_str::<ToolDescriptor>(content).map_err(|e| (content, e)))
}

/// Two-agent plan/execute driver
pub struct PlanExecutePipeline {
    broker: LlmBroker,
    registry: Arc<ToolRegistry>,
}

impl PlanExecutePipeline {
    pub fn new(broker: LlmBroker, registry: Arc<ToolRegistry>) -> Self {
        Self { broker, registry }
    }

    pub async fn run(&self, request: &str) -> Result<PipelineOutcome> {
        let request = vec![LlmMessage::user(request)];

        info!(phase = %Phase::Planning, "Entering phase");
        let planner = planner_agent(self.registry.clone());
        let planning = self.broker.run(&planner, &request).await?.messages;

        info!(phase = %Phase::Extraction, messages = planning.len(), "Entering phase");
        let descriptors = extract_tool_descriptors(&planning);
        for descriptor in &descriptors {
            info!("Execution tool: {}", descriptor.name());
        }

        info!(phase = %Phase::Execution, tools = descriptors.len(), "Entering phase");
        let executor = build_executor(&self.registry, &descriptors)?;
        let mut history = request;
        history.extend(planning.iter().cloned());
        let execution = self.broker.run(&executor, &history).await?.messages;

        Ok(PipelineOutcome {
            planning,
            descriptors,
            execution,
        })
    }
}
