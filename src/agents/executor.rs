use crate::agents::Agent;
use crate::error::Result;
use crate::llm::tools::{LlmTool, ToolDescriptor, ToolRegistry};
use std::collections::HashSet;
use tracing::info;

pub const EXECUTOR_NAME: &str = "Executor";

pub const EXECUTOR_INSTRUCTIONS: &str = "\
You are a helpful agent who can accomplish things on behalf of the user.
The user has provided their request, and another AI agent has planned the detailed steps to \
execute the request and researched what tools to use for each step. Please carefully read the \
previous chat history, and execute the plan as described by calling each tool.";

/// Build the executing persona from the descriptors discovered during planning
///
/// Every descriptor must name a tool in `registry`; an unknown name means the planner
/// referenced a tool that does not exist and fails with
/// [`ToolNotFound`](crate::error::PlanExecError::ToolNotFound). A tool discovered more than
/// once is exposed once, at its first position.
pub fn build_executor(registry: &ToolRegistry, descriptors: &[ToolDescriptor]) -> Result<Agent> {
    let mut seen = HashSet::new();
    let mut tools: Vec<Box<dyn LlmTool>> = Vec::with_capacity(descriptors.len());

    for descriptor in descriptors {
        let name = descriptor.name();
        let tool = registry.resolve(name)?;
        if seen.insert(name) {
            tools.push(tool);
        }
    }

    let agent = Agent::new(EXECUTOR_NAME, EXECUTOR_INSTRUCTIONS, tools);
    info!(tools = ?agent.tool_names(), "Execution agent built");
    Ok(agent)
}
