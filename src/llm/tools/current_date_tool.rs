use crate::error::Result;
use crate::llm::tools::{LlmTool, ToolDescriptor};
use serde_json::{json, Value};
use std::collections::HashMap;

/// The date the demonstration world runs on
pub const CURRENT_DATE: &str = "2024-08-01";

/// Tool reporting the current date
///
/// The date is fixed so a planning/execution run is reproducible.
#[derive(Debug, Clone, Default)]
pub struct CurrentDateTool;

impl CurrentDateTool {
    pub fn new() -> Self {
        Self
    }
}

impl LlmTool for CurrentDateTool {
    fn run(&self, _args: &HashMap<String, Value>) -> Result<Value> {
        Ok(json!(CURRENT_DATE))
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::function(
            "current_date",
            "current_date returns current date in the real world, formatted as YYYY-MM-DD",
        )
    }

    fn clone_box(&self) -> Box<dyn LlmTool> {
        Box::new(self.clone())
    }
}
