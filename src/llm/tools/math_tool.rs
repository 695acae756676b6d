use crate::error::Result;
use crate::llm::tools::expression::{evaluate, format_number};
use crate::llm::tools::tool::string_arg;
use crate::llm::tools::{JsonType, LlmTool, ToolDescriptor};
use serde_json::{json, Value};
use std::collections::HashMap;

/// Tool evaluating arithmetic expressions
///
/// Only numbers, `+ - * / ^` and parentheses are understood; see
/// [`expression`](crate::llm::tools::expression) for the grammar.
#[derive(Debug, Clone, Default)]
pub struct MathTool;

impl MathTool {
    pub fn new() -> Self {
        Self
    }
}

impl LlmTool for MathTool {
    fn run(&self, args: &HashMap<String, Value>) -> Result<Value> {
        let query = string_arg(args, "query")?;
        let value = evaluate(query)?;
        Ok(json!(format_number(value)))
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::function(
            "evaluate_expression",
            "evaluate_expression can execute simple and complex math calculations using \
             numbers, + - * / ^ and parentheses, for example: query: 1+2, response: 3; \
             query: 2^3+1, response: 9",
        )
        .with_parameter("query", JsonType::String)
    }

    fn clone_box(&self) -> Box<dyn LlmTool> {
        Box::new(self.clone())
    }
}
