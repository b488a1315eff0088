//! Agent definitions with type-safe role enums
//!
//! An `AgentDefinition` is pure configuration: the stable name other
//! components use to resolve behavior, the goal text, the model binding, and
//! the sampling parameters. It carries no live model handle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use uuid::Uuid;

/// Agent roles with type safety
#[derive(
    Debug, Clone, Copy, Display, EnumString, IntoStaticStr, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Breaks user input into actionable plans
    #[strum(serialize = "planner")]
    Planner,

    /// Produces artifacts (code, text) from a goal
    #[strum(serialize = "generator")]
    Generator,

    /// Scores another agent's response on a 1-10 scale
    #[strum(serialize = "evaluator")]
    Evaluator,

    /// Rewrites under-performing system prompts
    #[strum(serialize = "optimizer")]
    Optimizer,

    /// General conversational fallback
    #[strum(serialize = "assistant")]
    Assistant,
}

/// Sampling parameters passed through to the completion endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmParams {
    pub temperature: f64,
    pub top_p: f64,
    /// Completion token budget; `None` defers to the server default
    pub max_tokens: Option<u64>,
}

impl Default for LlmParams {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_p: 0.95,
            max_tokens: None,
        }
    }
}

/// A named agent configuration stored in the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDefinition {
    /// Unique record identifier
    pub id: Uuid,
    /// Stable external handle; never changes after creation
    pub name: String,
    /// Role tag controlling how the agent is used
    pub role: AgentRole,
    /// What the agent is for, fed into optimization context
    pub goal: String,
    /// Model identifier understood by the completion endpoint
    pub model: String,
    /// Whether the optimization controller may rewrite this agent's prompt
    pub optimize_prompt: bool,
    /// Sampling parameters for this agent's completions
    pub params: LlmParams,
    /// Registered input used when optimizing without live user input
    pub test_input: Option<String>,
    /// When the agent was registered
    pub created_at: DateTime<Utc>,
}

impl AgentDefinition {
    /// Create a new definition with generated id and current timestamp
    pub fn new(name: impl Into<String>, role: AgentRole, goal: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            role,
            goal: goal.into(),
            model: model.into(),
            optimize_prompt: true,
            params: LlmParams::default(),
            test_input: None,
            created_at: Utc::now(),
        }
    }

    /// Set sampling parameters
    pub fn with_params(mut self, params: LlmParams) -> Self {
        self.params = params;
        self
    }

    /// Set the registered test input
    pub fn with_test_input(mut self, input: impl Into<String>) -> Self {
        self.test_input = Some(input.into());
        self
    }

    /// Enable or disable prompt optimization
    pub fn with_optimize_prompt(mut self, enabled: bool) -> Self {
        self.optimize_prompt = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trip() {
        assert_eq!(AgentRole::Planner.to_string(), "planner");
        assert_eq!(AgentRole::from_str("optimizer").unwrap(), AgentRole::Optimizer);
        assert!(AgentRole::from_str("unknown").is_err());
    }

    #[test]
    fn test_definition_builder() {
        let agent = AgentDefinition::new("planner", AgentRole::Planner, "plan things", "qwen2.5-7b")
            .with_optimize_prompt(false)
            .with_test_input("plan a blog");
        assert_eq!(agent.name, "planner");
        assert!(!agent.optimize_prompt);
        assert_eq!(agent.test_input.as_deref(), Some("plan a blog"));
        assert_eq!(agent.params, LlmParams::default());
    }
}
