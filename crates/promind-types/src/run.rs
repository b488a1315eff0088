//! Append-only agent run records
//!
//! One record per agent invocation, for observability only: control flow never
//! reads these back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Audit record of a single agent invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRunRecord {
    /// Unique record identifier
    pub id: Uuid,
    /// Agent that was invoked
    pub agent_name: String,
    /// Input text passed to the agent
    pub input: String,
    /// Output text produced (empty when the run failed)
    pub output: String,
    /// Prompt version in effect during the run
    pub prompt_version: i64,
    /// Whether the invocation produced usable output
    pub is_successful: bool,
    /// Effectiveness score assigned to the output, if evaluated
    pub effectiveness_score: Option<f64>,
    /// Opaque metadata (model, sampling config, prompt id)
    pub extra: serde_json::Value,
    /// When the run happened
    pub created_at: DateTime<Utc>,
}

impl AgentRunRecord {
    /// Create a record for a completed invocation
    pub fn new(
        agent_name: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
        prompt_version: i64,
    ) -> Self {
        let output = output.into();
        Self {
            id: Uuid::new_v4(),
            agent_name: agent_name.into(),
            input: input.into(),
            is_successful: !output.trim().is_empty(),
            output,
            prompt_version,
            effectiveness_score: None,
            extra: serde_json::Value::Null,
            created_at: Utc::now(),
        }
    }

    /// Create a record for a failed invocation, storing the error as metadata
    pub fn failed(
        agent_name: impl Into<String>,
        input: impl Into<String>,
        prompt_version: i64,
        error: impl std::fmt::Display,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            agent_name: agent_name.into(),
            input: input.into(),
            output: String::new(),
            prompt_version,
            is_successful: false,
            effectiveness_score: None,
            extra: serde_json::json!({ "error": error.to_string() }),
            created_at: Utc::now(),
        }
    }

    /// Attach an effectiveness score
    pub fn with_score(mut self, score: f64) -> Self {
        self.effectiveness_score = Some(score);
        self
    }

    /// Attach metadata
    pub fn with_extra(mut self, extra: serde_json::Value) -> Self {
        self.extra = extra;
        self
    }
}
