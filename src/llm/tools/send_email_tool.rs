use crate::error::Result;
use crate::llm::tools::tool::string_arg;
use crate::llm::tools::{JsonType, LlmTool, ToolDescriptor};
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::info;

/// Tool for sending an email
///
/// Delivery is simulated: the send is logged and always reported as successful.
#[derive(Debug, Clone, Default)]
pub struct SendEmailTool;

impl SendEmailTool {
    pub fn new() -> Self {
        Self
    }
}

impl LlmTool for SendEmailTool {
    fn run(&self, args: &HashMap<String, Value>) -> Result<Value> {
        let title = string_arg(args, "title")?;
        let content = string_arg(args, "content")?;
        let recipient = string_arg(args, "recipient")?;

        info!(
            recipient = recipient,
            content_length = content.len(),
            "email {} sent",
            title
        );

        Ok(json!(true))
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::function(
            "send_email",
            "send_email is used for sending an email to specified recipient",
        )
        .with_parameter("title", JsonType::String)
        .with_parameter("content", JsonType::String)
        .with_parameter("recipient", JsonType::String)
    }

    fn clone_box(&self) -> Box<dyn LlmTool> {
        Box::new(self.clone())
    }
}
