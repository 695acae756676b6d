use crate::agents::Agent;
use crate::error::Result;
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::models::{LlmMessage, LlmToolCall};
use crate::llm::tools::LlmTool;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_TURNS: usize = 10;

/// Outcome of one agent run
#[derive(Debug, Clone)]
pub struct RunResponse {
    /// Messages produced during the run, excluding the history it started from
    pub messages: Vec<LlmMessage>,
}

impl RunResponse {
    /// Content of the last message that has any
    pub fn final_content(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(|m| m.content.as_deref())
    }
}

/// Drives agents against an LLM: the function-calling loop
pub struct LlmBroker {
    model: String,
    gateway: Arc<dyn LlmGateway>,
    config: CompletionConfig,
    max_turns: usize,
}

impl LlmBroker {
    /// Create a new LLM broker
    pub fn new(model: impl Into<String>, gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            model: model.into(),
            gateway,
            config: CompletionConfig::default(),
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    pub fn with_config(mut self, config: CompletionConfig) -> Self {
        self.config = config;
        self
    }

    /// Cap the number of model calls a single run may make
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run `agent` on top of `history` until it answers without calling tools
    ///
    /// Each turn sends the agent's instructions as a system message, followed by the history
    /// and everything produced so far. Requested tools are executed against the agent's own
    /// tool set and their results appended as `tool` messages. A failing or unknown tool is
    /// reported back to the model rather than aborting the run.
    pub async fn run(&self, agent: &Agent, history: &[LlmMessage]) -> Result<RunResponse> {
        let mut produced: Vec<LlmMessage> = Vec::new();

        for turn in 0..self.max_turns {
            let mut messages = Vec::with_capacity(history.len() + produced.len() + 1);
            messages.push(LlmMessage::system(&agent.instructions));
            messages.extend_from_slice(history);
            messages.extend_from_slice(&produced);

            debug!(agent = %agent.name, turn = turn, "Requesting completion");
            let response = self
                .gateway
                .complete(&self.model, &messages, Some(agent.tools()), &self.config)
                .await?;

            let message = LlmMessage::from(response).with_sender(&agent.name);
            let tool_calls = message.requested_tool_calls().to_vec();
            produced.push(message);

            if tool_calls.is_empty() {
                info!(agent = %agent.name, turns = turn + 1, "Run finished");
                return Ok(RunResponse { messages: produced });
            }

            info!("Tool calls requested: {}", tool_calls.len());
            for tool_call in &tool_calls {
                let content = execute_tool_call(agent.tools(), tool_call);
                produced.push(LlmMessage::tool_result(tool_call, content));
            }
        }

        warn!(agent = %agent.name, max_turns = self.max_turns, "Run stopped at turn limit");
        Ok(RunResponse { messages: produced })
    }
}

fn execute_tool_call(tools: &[Box<dyn LlmTool>], tool_call: &LlmToolCall) -> String {
    let Some(tool) = tools.iter().find(|t| t.matches(&tool_call.name)) else {
        warn!("Tool not found: {}", tool_call.name);
        return format!("Error: Tool {} not found.", tool_call.name);
    };

    info!("Executing tool: {}", tool_call.name);
    match tool.run(&tool_call.arguments) {
        Ok(Value::String(text)) => text,
        Ok(output) => output.to_string(),
        Err(e) => {
            warn!(tool = %tool_call.name, error = %e, "Tool execution failed");
            format!("Error: {}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::models::{LlmGatewayResponse, MessageRole};
    use crate::llm::tools::current_date_tool::CurrentDateTool;
    use crate::llm::tools::math_tool::MathTool;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // Mock gateway replaying scripted responses and recording what it was sent
    struct MockGateway {
        responses: Vec<LlmGatewayResponse>,
        call_count: Mutex<usize>,
        seen: Mutex<Vec<(Vec<LlmMessage>, Vec<String>)>>,
    }

    impl MockGateway {
        fn new(responses: Vec<LlmGatewayResponse>) -> Self {
            Self {
                responses,
                call_count: Mutex::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl LlmGateway for MockGateway {
        async fn complete(
            &self,
            _model: &str,
            messages: &[LlmMessage],
            tools: Option<&[Box<dyn LlmTool>]>,
            _config: &CompletionConfig,
        ) -> Result<LlmGatewayResponse> {
            let tool_names = tools
                .unwrap_or(&[])
                .iter()
                .map(|t| t.descriptor().function.name)
                .collect();
            self.seen.lock().unwrap().push((messages.to_vec(), tool_names));

            let mut count = self.call_count.lock().unwrap();
            let idx = *count;
            *count += 1;

            Ok(self.responses.get(idx).cloned().unwrap_or(LlmGatewayResponse {
                content: Some("default response".to_string()),
                tool_calls: vec![],
            }))
        }
    }

    fn text(content: &str) -> LlmGatewayResponse {
        LlmGatewayResponse {
            content: Some(content.to_string()),
            tool_calls: vec![],
        }
    }

    fn call(id: &str, name: &str, args: Value) -> LlmGatewayResponse {
        let arguments: HashMap<String, Value> = serde_json::from_value(args).unwrap();
        LlmGatewayResponse {
            content: None,
            tool_calls: vec![LlmToolCall {
                id: Some(id.to_string()),
                name: name.to_string(),
                arguments,
            }],
        }
    }

    fn agent() -> Agent {
        Agent::new(
            "Tester",
            "Answer questions.",
            vec![Box::new(CurrentDateTool), Box::new(MathTool)],
        )
    }

    #[tokio::test]
    async fn test_run_without_tool_calls() {
        let gateway = Arc::new(MockGateway::new(vec![text("Hello, World!")]));
        let broker = LlmBroker::new("test-model", gateway.clone());

        let response = broker.run(&agent(), &[LlmMessage::user("Hi")]).await.unwrap();

        assert_eq!(response.messages.len(), 1);
        assert_eq!(response.messages[0].role, MessageRole::Assistant);
        assert_eq!(response.messages[0].sender.as_deref(), Some("Tester"));
        assert_eq!(response.final_content(), Some("Hello, World!"));

        let seen = gateway.seen.lock().unwrap();
        let (messages, tools) = &seen[0];
        assert_eq!(messages[0], LlmMessage::system("Answer questions."));
        assert_eq!(messages[1], LlmMessage::user("Hi"));
        assert_eq!(tools, &vec!["current_date".to_string(), "evaluate_expression".to_string()]);
    }

    #[tokio::test]
    async fn test_run_executes_tool_and_continues() {
        let gateway = Arc::new(MockGateway::new(vec![
            call("call_1", "evaluate_expression", json!({"query": "3+5"})),
            text("3+5 is 8"),
        ]));
        let broker = LlmBroker::new("test-model", gateway.clone());

        let response = broker.run(&agent(), &[LlmMessage::user("what's 3+5")]).await.unwrap();

        let roles: Vec<MessageRole> = response.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![MessageRole::Assistant, MessageRole::Tool, MessageRole::Assistant]);
        assert_eq!(response.messages[1].content.as_deref(), Some("8"));
        assert_eq!(response.final_content(), Some("3+5 is 8"));

        // Second request carries the tool exchange
        let seen = gateway.seen.lock().unwrap();
        assert_eq!(seen[1].0.len(), 4);
        assert_eq!(seen[1].0[3].role, MessageRole::Tool);
    }

    #[test]
    fn test_non_string_output_is_json_encoded() {
        let tool_call = LlmToolCall {
            id: None,
            name: "current_date".to_string(),
            arguments: HashMap::new(),
        };
        let tools: Vec<Box<dyn LlmTool>> = vec![Box::new(CurrentDateTool)];
        assert_eq!(execute_tool_call(&tools, &tool_call), "2024-08-01");

        let email: Vec<Box<dyn LlmTool>> =
            vec![Box::new(crate::llm::tools::send_email_tool::SendEmailTool)];
        let send = LlmToolCall {
            id: None,
            name: "send_email".to_string(),
            arguments: serde_json::from_value(
                json!({"title": "t", "content": "c", "recipient": "r"}),
            )
            .unwrap(),
        };
        assert_eq!(execute_tool_call(&email, &send), "true");
    }

    #[tokio::test]
    async fn test_tool_error_reported_to_model() {
        let gateway = Arc::new(MockGateway::new(vec![
            call("call_1", "evaluate_expression", json!({"query": "1/0"})),
            text("Cannot divide by zero"),
        ]));
        let broker = LlmBroker::new("test-model", gateway);

        let response = broker.run(&agent(), &[LlmMessage::user("1/0?")]).await.unwrap();

        assert_eq!(
            response.messages[1].content.as_deref(),
            Some("Error: Expression error: division by zero")
        );
        assert_eq!(response.messages.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_tool_reported_to_model() {
        let gateway = Arc::new(MockGateway::new(vec![
            call("call_1", "send_email", json!({})),
            text("I cannot send email"),
        ]));
        let broker = LlmBroker::new("test-model", gateway);

        let response = broker.run(&agent(), &[LlmMessage::user("email me")]).await.unwrap();

        assert_eq!(
            response.messages[1].content.as_deref(),
            Some("Error: Tool send_email not found.")
        );
    }

    #[tokio::test]
    async fn test_run_stops_at_turn_limit() {
        let looping: Vec<LlmGatewayResponse> =
            (0..5).map(|i| call(&format!("call_{}", i), "current_date", json!({}))).collect();
        let gateway = Arc::new(MockGateway::new(looping));
        let broker = LlmBroker::new("test-model", gateway.clone()).with_max_turns(3);

        let response = broker.run(&agent(), &[LlmMessage::user("date?")]).await.unwrap();

        assert_eq!(*gateway.call_count.lock().unwrap(), 3);
        assert_eq!(response.messages.len(), 6);
    }

    #[test]
    fn test_broker_model_name() {
        let gateway = Arc::new(MockGateway::new(vec![]));
        let broker = LlmBroker::new(String::from("my-model"), gateway);
        assert_eq!(broker.model(), "my-model");
    }
}
