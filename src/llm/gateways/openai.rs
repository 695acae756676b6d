//! OpenAI Gateway for LLM interactions.
//!
//! This module provides a gateway for OpenAI-compatible chat completion APIs,
//! including function calling.

use crate::error::{PlanExecError, Result};
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::gateways::openai_messages_adapter::{adapt_messages_to_openai, convert_tool_calls};
use crate::llm::models::{LlmGatewayResponse, LlmMessage};
use crate::llm::tools::LlmTool;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for connecting to OpenAI API.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Option<std::time::Duration>,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            base_url: std::env::var("OPENAI_API_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: None,
        }
    }
}

impl OpenAIConfig {
    /// Read the configuration from the environment, requiring `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let config = Self::default();
        if config.api_key.trim().is_empty() {
            return Err(PlanExecError::ConfigError("OPENAI_API_KEY is not set".to_string()));
        }
        Ok(config)
    }
}

/// Gateway for OpenAI LLM service.
pub struct OpenAIGateway {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIGateway {
    /// Create a new OpenAI gateway with custom configuration.
    pub fn with_config(config: OpenAIConfig) -> Result<Self> {
        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build()?;

        Ok(Self { client, config })
    }

    /// Create gateway with custom API key and base URL.
    pub fn with_api_key_and_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        Self::with_config(OpenAIConfig {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout: None,
        })
    }

    fn build_body(
        &self,
        model: &str,
        messages: &[LlmMessage],
        tools: Option<&[Box<dyn LlmTool>]>,
        config: &CompletionConfig,
    ) -> Result<Value> {
        let mut body = serde_json::json!({
            "model": model,
            "messages": adapt_messages_to_openai(messages),
            "temperature": config.temperature,
            "max_tokens": config.max_tokens,
        });

        // The API rejects an empty tools array
        if let Some(tools) = tools.filter(|t| !t.is_empty()) {
            let tool_defs: Vec<_> = tools.iter().map(|t| t.descriptor()).collect();
            body["tools"] = serde_json::to_value(tool_defs)?;
        }

        Ok(body)
    }
}

#[async_trait]
impl LlmGateway for OpenAIGateway {
    async fn complete(
        &self,
        model: &str,
        messages: &[LlmMessage],
        tools: Option<&[Box<dyn LlmTool>]>,
        config: &CompletionConfig,
    ) -> Result<LlmGatewayResponse> {
        info!("Delegating to OpenAI for completion");
        debug!(
            "Model: {}, Message count: {}, Tool count: {}",
            model,
            messages.len(),
            tools.map_or(0, |t| t.len())
        );

        let body = self.build_body(model, messages, tools, config)?;

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(PlanExecError::GatewayError(format!(
                "OpenAI API error: {} - {}",
                status, error_text
            )));
        }

        let response_body: Value = response.json().await?;
        let message = &response_body["choices"][0]["message"];
        if message.is_null() {
            return Err(PlanExecError::ApiError("No message in response".to_string()));
        }

        let content = message["content"].as_str().map(String::from);
        let tool_calls = match message["tool_calls"].as_array() {
            Some(calls) => convert_tool_calls(calls),
            None => vec![],
        };

        Ok(LlmGatewayResponse {
            content,
            tool_calls,
        })
    }
}
