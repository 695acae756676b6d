use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Message role in LLM conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Tool,
}

/// Tool call from LLM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmToolCall {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub arguments: HashMap<String, serde_json::Value>,
}

/// Message in LLM conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmMessage {
    #[serde(default = "default_role")]
    pub role: MessageRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<LlmToolCall>>,
    /// Name of the agent that produced an assistant message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
}

fn default_role() -> MessageRole {
    MessageRole::User
}

/// Response from LLM gateway
#[derive(Debug, Clone)]
pub struct LlmGatewayResponse {
    pub content: Option<String>,
    pub tool_calls: Vec<LlmToolCall>,
}

impl LlmMessage {
    fn new(role: MessageRole, content: Option<String>) -> Self {
        Self {
            role,
            content,
            tool_calls: None,
            sender: None,
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, Some(content.into()))
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, Some(content.into()))
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, Some(content.into()))
    }

    /// Create the result message for a tool call
    ///
    /// The originating call is kept so gateways can emit the provider's call id.
    pub fn tool_result(tool_call: &LlmToolCall, content: impl Into<String>) -> Self {
        Self {
            tool_calls: Some(vec![tool_call.clone()]),
            ..Self::new(MessageRole::Tool, Some(content.into()))
        }
    }

    /// Attach the requested tool calls
    pub fn with_tool_calls(mut self, tool_calls: Vec<LlmToolCall>) -> Self {
        if !tool_calls.is_empty() {
            self.tool_calls = Some(tool_calls);
        }
        self
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Tool calls requested by this message, empty if none
    pub fn requested_tool_calls(&self) -> &[LlmToolCall] {
        match self.role {
            MessageRole::Assistant => self.tool_calls.as_deref().unwrap_or(&[]),
            _ => &[],
        }
    }
}

impl From<LlmGatewayResponse> for LlmMessage {
    fn from(response: LlmGatewayResponse) -> Self {
        LlmMessage::new(MessageRole::Assistant, response.content)
            .with_tool_calls(response.tool_calls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_serialization() {
        assert_eq!(serde_json::to_string(&MessageRole::System).unwrap(), "\"system\"");
        assert_eq!(serde_json::to_string(&MessageRole::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&MessageRole::Assistant).unwrap(), "\"assistant\"");
        assert_eq!(serde_json::to_string(&MessageRole::Tool).unwrap(), "\"tool\"");
    }

    #[test]
    fn test_message_role_deserialization() {
        assert_eq!(serde_json::from_str::<MessageRole>("\"tool\"").unwrap(), MessageRole::Tool);
        assert_eq!(
            serde_json::from_str::<MessageRole>("\"assistant\"").unwrap(),
            MessageRole::Assistant
        );
    }

    #[test]
    fn test_user_message() {
        let msg = LlmMessage::user("Hello");
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.content, Some("Hello".to_string()));
        assert!(msg.tool_calls.is_none());
        assert!(msg.sender.is_none());
    }

    #[test]
    fn test_system_message() {
        let msg = LlmMessage::system("You are a helpful assistant");
        assert_eq!(msg.role, MessageRole::System);
        assert_eq!(msg.content, Some("You are a helpful assistant".to_string()));
    }

    #[test]
    fn test_tool_result_message() {
        let call = LlmToolCall {
            id: Some("call_1".to_string()),
            name: "current_date".to_string(),
            arguments: HashMap::new(),
        };

        let msg = LlmMessage::tool_result(&call, "2024-08-01");
        assert_eq!(msg.role, MessageRole::Tool);
        assert_eq!(msg.content.as_deref(), Some("2024-08-01"));
        assert_eq!(msg.tool_calls, Some(vec![call]));
        assert!(msg.requested_tool_calls().is_empty());
    }

    #[test]
    fn test_from_gateway_response() {
        let call = LlmToolCall {
            id: None,
            name: "search_for_tool".to_string(),
            arguments: HashMap::new(),
        };
        let response = LlmGatewayResponse {
            content: None,
            tool_calls: vec![call.clone()],
        };

        let msg = LlmMessage::from(response).with_sender("Planner Agent");
        assert_eq!(msg.role, MessageRole::Assistant);
        assert!(msg.content.is_none());
        assert_eq!(msg.requested_tool_calls(), &[call]);
        assert_eq!(msg.sender.as_deref(), Some("Planner Agent"));
    }

    #[test]
    fn test_from_gateway_response_without_calls() {
        let response = LlmGatewayResponse {
            content: Some("done".to_string()),
            tool_calls: vec![],
        };

        let msg = LlmMessage::from(response);
        assert!(msg.tool_calls.is_none());
        assert!(msg.requested_tool_calls().is_empty());
    }

    #[test]
    fn test_llm_tool_call_without_id() {
        let tool_call = LlmToolCall {
            id: None,
            name: "test_tool".to_string(),
            arguments: HashMap::new(),
        };

        let json = serde_json::to_string(&tool_call).unwrap();
        assert!(!json.contains("\"id\""));
        assert!(json.contains("test_tool"));
    }

    #[test]
    fn test_llm_message_deserialization() {
        let json = r#"{"role":"tool","content":"{\"type\":\"function\"}"}"#;
        let msg: LlmMessage = serde_json::from_str(json).unwrap();

        assert_eq!(msg.role, MessageRole::Tool);
        assert_eq!(msg.content.as_deref(), Some("{\"type\":\"function\"}"));
    }

    #[test]
    fn test_llm_message_default_role() {
        let json = r#"{"content":"test"}"#;
        let msg: LlmMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.role, MessageRole::User);
    }
}
