use crate::agents::Agent;
use crate::llm::tools::{LlmTool, SearchForTool, ToolRegistry};
use std::sync::Arc;

pub const PLANNER_NAME: &str = "Planner Agent";

pub const PLANNER_INSTRUCTIONS: &str = "\
You are a helpful agent who can plan execution on behalf of the user.

When presented a request from the user, you will first lay out the plan to execute the request \
step by step and call search_for_tool to research what tools to use for each step. \
For example, you will call search_for_tool('Any tool for doing math?') to find a tool that can \
do math, or you will call search_for_tool('Tool for querying booking details from lodgify?') for \
getting booking details from lodgify.com.

You only need to specify the execution steps and invoke search_for_tool to get an individual tool \
for each step. You DO NOT need to invoke the individual tools identified by search_for_tool.

When search_for_tool returns null for one of your planned steps, first try different queries to \
see whether search_for_tool will return any tool, or revise the plan so it does not depend on \
such a tool. If you have exhausted all possible tool combinations but still can't fulfil the \
user's request, respond \"sorry, I can't help with that\" and explain why.";

/// The planning persona: its only capability is searching the registry for tools
pub fn planner_agent(registry: Arc<ToolRegistry>) -> Agent {
    let tools: Vec<Box<dyn LlmTool>> = vec![Box::new(SearchForTool::new(registry))];
    Agent::new(PLANNER_NAME, PLANNER_INSTRUCTIONS, tools)
}
