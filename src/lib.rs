pub mod agents;
pub mod error;
pub mod llm;
pub mod pipeline;

pub use error::{PlanExecError, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::agents::{build_executor, planner_agent, Agent};
    pub use crate::error::{PlanExecError, Result};
    pub use crate::llm::gateways::{OpenAIConfig, OpenAIGateway};
    pub use crate::llm::tools::{search, LlmTool, ToolDescriptor, ToolRegistry};
    pub use crate::llm::{CompletionConfig, LlmBroker, LlmGateway, LlmMessage, MessageRole};
    pub use crate::pipeline::{
        extract_tool_descriptors, PipelineConfig, PipelineOutcome, PlanExecutePipeline,
    };
}
