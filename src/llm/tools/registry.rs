use crate::error::{PlanExecError, Result};
use crate::llm::tools::booking_source_tool::BookingSourceTool;
use crate::llm::tools::current_date_tool::CurrentDateTool;
use crate::llm::tools::math_tool::MathTool;
use crate::llm::tools::send_email_tool::SendEmailTool;
use crate::llm::tools::{LlmTool, ToolDescriptor};
use std::collections::HashMap;

/// Immutable lookup from tool name to implementation
///
/// Built once at startup through [`ToolRegistry::builder`] and shared (usually behind an
/// `Arc`) with everything that needs to resolve tools by name.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn LlmTool>>,
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// The four tools the plan/execute demonstration ships with
    pub fn standard() -> Self {
        Self::builder()
            .tool(CurrentDateTool::new())
            .tool(SendEmailTool::new())
            .tool(BookingSourceTool::new())
            .tool(MathTool::new())
            .build()
    }

    pub fn get(&self, name: &str) -> Option<&dyn LlmTool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn descriptor(&self, name: &str) -> Option<ToolDescriptor> {
        self.get(name).map(|t| t.descriptor())
    }

    /// Resolve a tool by name into an owned instance
    ///
    /// An unknown name is an error, never a skipped entry.
    pub fn resolve(&self, name: &str) -> Result<Box<dyn LlmTool>> {
        self.tools
            .get(name)
            .map(|t| t.clone_box())
            .ok_or_else(|| PlanExecError::ToolNotFound(name.to_string()))
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[derive(Default)]
pub struct ToolRegistryBuilder {
    tools: HashMap<String, Box<dyn LlmTool>>,
}

impl ToolRegistryBuilder {
    /// Register a tool under its descriptor name, replacing any earlier tool of that name
    pub fn tool<T: LlmTool + 'static>(mut self, tool: T) -> Self {
        self.tools.insert(tool.descriptor().function.name, Box::new(tool));
        self
    }

    pub fn build(self) -> ToolRegistry {
        ToolRegistry { tools: self.tools }
    }
}
