use crate::llm::tools::LlmTool;
use std::fmt;

/// A named persona: instructions plus the tools it is allowed to call
#[derive(Clone)]
pub struct Agent {
    pub name: String,
    pub instructions: String,
    tools: Vec<Box<dyn LlmTool>>,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        instructions: impl Into<String>,
        tools: Vec<Box<dyn LlmTool>>,
    ) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            tools,
        }
    }

    pub fn tools(&self) -> &[Box<dyn LlmTool>] {
        &self.tools
    }

    /// Names of the exposed tools, in the order they are offered to the model
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.descriptor().function.name).collect()
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.matches(name))
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("tools", &self.tool_names())
            .finish()
    }
}
