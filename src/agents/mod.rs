//! Agent personas for the plan/execute pipeline.
//!
//! An [`Agent`] is configuration only: a name, instructions, and the tools it may call.
//! The [`LlmBroker`](crate::llm::LlmBroker) is what actually drives one against a model.
//!
//! - [`planner_agent`] - lays out a plan and discovers tools through `search_for_tool`
//! - [`build_executor`] - executes a plan with exactly the tools the planner discovered

pub mod agent;
pub mod executor;
pub mod planner;

pub use agent::Agent;
pub use executor::{build_executor, EXECUTOR_INSTRUCTIONS};
pub use planner::{planner_agent, PLANNER_INSTRUCTIONS};
