//! Adapter for converting LLM messages to and from the OpenAI chat format.

use crate::llm::models::{LlmMessage, LlmToolCall, MessageRole};
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::warn;

/// Adapt LLM messages to OpenAI format.
pub fn adapt_messages_to_openai(messages: &[LlmMessage]) -> Vec<Value> {
    messages.iter().map(adapt_message).collect()
}

fn adapt_message(msg: &LlmMessage) -> Value {
    match msg.role {
        MessageRole::System => json!({
            "role": "system",
            "content": msg.content.as_deref().unwrap_or("")
        }),
        MessageRole::User => json!({
            "role": "user",
            "content": msg.content.as_deref().unwrap_or("")
        }),
        MessageRole::Assistant => {
            let mut assistant_msg = json!({ "role": "assistant" });

            if let Some(ref content) = msg.content {
                assistant_msg["content"] = json!(content);
            }

            if let Some(ref tool_calls) = msg.tool_calls {
                let formatted_calls: Vec<Value> = tool_calls
                    .iter()
                    .map(|tc| {
                        let arguments = serde_json::to_string(&tc.arguments).unwrap_or_default();
                        json!({
                            "id": tc.id.as_deref().unwrap_or(""),
                            "type": "function",
                            "function": {
                                "name": tc.name,
                                "arguments": arguments
                            }
                        })
                    })
                    .collect();
                assistant_msg["tool_calls"] = json!(formatted_calls);
            }

            assistant_msg
        }
        MessageRole::Tool => {
            // Tool messages need tool_call_id - use the first tool call id if available
            let tool_call_id = msg
                .tool_calls
                .as_ref()
                .and_then(|tcs| tcs.first())
                .and_then(|tc| tc.id.clone())
                .unwrap_or_default();

            json!({
                "role": "tool",
                "content": msg.content.as_deref().unwrap_or(""),
                "tool_call_id": tool_call_id
            })
        }
    }
}

/// Convert tool calls from OpenAI format to internal format.
pub fn convert_tool_calls(tool_calls: &[Value]) -> Vec<LlmToolCall> {
    tool_calls
        .iter()
        .filter_map(|tc| {
            let id = tc["id"].as_str().map(String::from);
            let name = tc["function"]["name"].as_str()?.to_string();
            let args_str = tc["function"]["arguments"].as_str().unwrap_or("{}");

            let arguments: HashMap<String, Value> = match serde_json::from_str(args_str) {
                Ok(args) => args,
                Err(e) => {
                    warn!(tool = %name, error = %e, "Unparseable tool call arguments");
                    HashMap::new()
                }
            };

            Some(LlmToolCall {
                id,
                name,
                arguments,
            })
        })
        .collect()
}
