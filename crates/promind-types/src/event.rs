//! Optimization events and outcomes

use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

/// Structured summary of one prompt replacement, fed to the notifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationEvent {
    pub agent_name: String,
    /// Id of the prompt that was replaced
    pub prompt_id: Uuid,
    pub version_old: i64,
    pub version_new: i64,
    /// Score of the replaced prompt, if it was ever evaluated
    pub score_old: Option<f64>,
    /// Score that triggered the rewrite
    pub score_new: Option<f64>,
    /// Model identifier of the optimized agent
    pub model: String,
    pub original: String,
    pub improved: String,
}

/// Why an optimization loop stopped
#[derive(Debug, Clone, Copy, Display, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HaltReason {
    /// The score reached the passing threshold
    #[strum(serialize = "passed")]
    Passed,

    /// The bounded attempt count ran out below threshold
    #[strum(serialize = "attempts_exhausted")]
    AttemptsExhausted,

    /// The agent has optimization disabled; score recorded, no rewrite
    #[strum(serialize = "optimization_disabled")]
    OptimizationDisabled,
}

/// Final state of one agent's optimization loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    pub agent_name: String,
    /// Attempts actually executed (1-based count)
    pub attempts: u32,
    /// Last score observed, always in [1, 10]
    pub final_score: u8,
    /// Active prompt version when the loop ended
    pub final_version: i64,
    pub halt: HaltReason,
}

impl OptimizationOutcome {
    /// Whether the loop ended with a passing score
    pub fn passed(&self) -> bool {
        self.halt == HaltReason::Passed
    }
}
