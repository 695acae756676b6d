//! Error types and result aliases for the plan/execute pipeline.
//!
//! This module defines the core error type [`PlanExecError`] and the [`Result`] type alias
//! used throughout the crate. All public APIs that can fail return `Result<T>` for
//! consistent error handling.

use crate::llm::tools::expression::ExpressionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanExecError {
    #[error("LLM gateway error: {0}")]
    GatewayError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Tool error: {0}")]
    ToolError(String),

    #[error("Tool not found in registry: {0}")]
    ToolNotFound(String),

    #[error("Expression error: {0}")]
    ExpressionError(#[from] ExpressionError),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, PlanExecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_display() {
        let err = PlanExecError::GatewayError("connection failed".to_string());
        assert_eq!(err.to_string(), "LLM gateway error: connection failed");
    }

    #[test]
    fn test_tool_error_display() {
        let err = PlanExecError::ToolError("invalid parameters".to_string());
        assert_eq!(err.to_string(), "Tool error: invalid parameters");
    }

    #[test]
    fn test_tool_not_found_display() {
        let err = PlanExecError::ToolNotFound("launch_rocket".to_string());
        assert_eq!(err.to_string(), "Tool not found in registry: launch_rocket");
    }

    #[test]
    fn test_config_error_display() {
        let err = PlanExecError::ConfigError("missing API key".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: missing API key");
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: PlanExecError = json_err.into();

        match err {
            PlanExecError::SerializationError(_) => {}
            _ => panic!("Expected SerializationError"),
        }
    }

    #[test]
    fn test_expression_error_conversion() {
        let err: PlanExecError = ExpressionError::DivisionByZero.into();

        match err {
            PlanExecError::ExpressionError(ExpressionError::DivisionByZero) => {}
            _ => panic!("Expected ExpressionError"),
        }
        assert_eq!(
            PlanExecError::from(ExpressionError::DivisionByZero).to_string(),
            "Expression error: division by zero"
        );
    }
}
