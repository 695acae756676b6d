//! Keyword-driven tool discovery.
//!
//! The planner never sees the registry directly. It asks for a capability in free text
//! through `search_for_tool`, and gets back the descriptor of the best match.

use crate::error::Result;
use crate::llm::tools::registry::ToolRegistry;
use crate::llm::tools::tool::string_arg;
use crate::llm::tools::{JsonType, LlmTool, ToolDescriptor};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Keyword groups in priority order: the first group with a keyword in the query wins.
pub const KEYWORD_GROUPS: &[(&str, &[&str])] = &[
    ("query_booking_source", &["lodgify", "booking"]),
    ("send_email", &["email", "e-mail"]),
    ("current_date", &["current date", "today", "date"]),
    ("evaluate_expression", &["math", "calculat", "arithmetic"]),
];

/// Whether `keyword` occurs in the lower-cased `query`
///
/// Single-word keywords must start a word, so "date" matches "dates" but not "update".
/// Keywords with spaces or punctuation match anywhere.
fn keyword_matches(query: &str, words: &[&str], keyword: &str) -> bool {
    if keyword.chars().all(char::is_alphanumeric) {
        words.iter().any(|w| w.starts_with(keyword))
    } else {
        query.contains(keyword)
    }
}

/// Name of the tool whose keywords match `query`, if any
pub fn match_tool_name(query: &str) -> Option<&'static str> {
    let query = query.to_lowercase();
    let words: Vec<&str> = query.split(|c: char| !c.is_alphanumeric()).collect();
    KEYWORD_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| keyword_matches(&query, &words, k)))
        .map(|(name, _)| *name)
}

/// Find the descriptor of the tool best suited to the free-text `query`
pub fn search(registry: &ToolRegistry, query: &str) -> Option<ToolDescriptor> {
    info!("search for tool called: {}", query);
    match_tool_name(query).and_then(|name| registry.descriptor(name))
}

/// Exposes [`search`] to an agent as the `search_for_tool` capability
///
/// Returns the matched descriptor as JSON, or JSON `null` when nothing matches.
#[derive(Clone)]
pub struct SearchForTool {
    registry: Arc<ToolRegistry>,
}

impl SearchForTool {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }
}

impl LlmTool for SearchForTool {
    fn run(&self, args: &HashMap<String, Value>) -> Result<Value> {
        let query = string_arg(args, "query")?;
        Ok(serde_json::to_value(search(&self.registry, query))?)
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::function(
            "search_for_tool",
            "search for tool is used search among the tool box for the best tool \
             to accomplish the request described in the query",
        )
        .with_parameter("query", JsonType::String)
    }

    fn clone_box(&self) -> Box<dyn LlmTool> {
        Box::new(self.clone())
    }
}
