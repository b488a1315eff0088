//! Versioned system prompt records
//!
//! One `PromptRecord` is an immutable snapshot of an agent's system
//! instructions. Within a `(agent_name, task_type)` key at most one record is
//! active at a time; versions are monotonically increasing integers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task type used when no specific one is requested
pub const DEFAULT_TASK_TYPE: &str = "default";

/// A versioned system prompt for one (agent, task type) key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRecord {
    /// Unique record identifier
    pub id: Uuid,
    /// Owning agent name
    pub agent_name: String,
    /// Task-type tag, `"default"` unless specialized
    pub task_type: String,
    /// Monotonically increasing version, starting at 1
    pub version: i64,
    /// The system prompt text; non-empty for active records
    pub system_prompt: String,
    /// Whether this is the version currently in use
    pub is_active: bool,
    /// Last evaluated effectiveness score, if any
    pub effectiveness_score: Option<f64>,
    /// When the version was registered
    pub created_at: DateTime<Utc>,
}

impl PromptRecord {
    /// Create a version-1 active record for a key
    pub fn bootstrap(
        agent_name: impl Into<String>,
        task_type: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            agent_name: agent_name.into(),
            task_type: task_type.into(),
            version: 1,
            system_prompt: system_prompt.into(),
            is_active: true,
            effectiveness_score: None,
            created_at: Utc::now(),
        }
    }

    /// Create the successor record for this one with replacement text
    pub fn next_version(&self, new_text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            agent_name: self.agent_name.clone(),
            task_type: self.task_type.clone(),
            version: self.version + 1,
            system_prompt: new_text.into(),
            is_active: true,
            effectiveness_score: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_version_increments() {
        let v1 = PromptRecord::bootstrap("planner", DEFAULT_TASK_TYPE, "You plan.");
        let v2 = v1.next_version("You plan better.");
        assert_eq!(v2.version, 2);
        assert_eq!(v2.agent_name, "planner");
        assert!(v2.is_active);
        assert!(v2.effectiveness_score.is_none());
        assert_ne!(v1.id, v2.id);
    }
}
