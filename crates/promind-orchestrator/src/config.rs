//! Optimizer configuration
//!
//! All loop tunables live here with explicit defaults; nothing is read from
//! ad-hoc globals.

use crate::Result;
use anyhow::bail;

/// Default passing threshold on the 1-10 scale
pub const DEFAULT_PASSING_SCORE: u8 = 8;

/// Default bounded attempt count per optimization cycle
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default pause between continuous optimization cycles
pub const DEFAULT_CYCLE_INTERVAL_SECS: u64 = 900;

/// Tunables for the optimization controller and its collaborators
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Attempts per agent before the loop gives up
    pub max_attempts: u32,
    /// Score at or above which a prompt passes, 1-10
    pub passing_score: u8,
    /// Agent designated to produce effectiveness scores
    pub evaluator_agent: String,
    /// Agent designated to rewrite under-performing prompts
    pub optimizer_agent: String,
    /// Agent that receives unmatched chat input
    pub default_agent: String,
    /// Webhook destination for optimization events; `None` disables delivery
    pub webhook_url: Option<String>,
    /// Pause between cycles in continuous mode
    pub cycle_interval_secs: u64,
}

impl OptimizerConfig {
    /// Validate value ranges, returning the config for chaining
    pub fn validated(self) -> Result<Self> {
        if self.max_attempts == 0 {
            bail!("max_attempts must be at least 1");
        }
        if !(1..=10).contains(&self.passing_score) {
            bail!(
                "passing_score must be within 1-10, got {}",
                self.passing_score
            );
        }
        Ok(self)
    }

    /// Set the passing threshold
    pub fn with_passing_score(mut self, score: u8) -> Self {
        self.passing_score = score;
        self
    }

    /// Set the attempt bound
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the webhook destination
    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            passing_score: DEFAULT_PASSING_SCORE,
            evaluator_agent: "evaluator".to_string(),
            optimizer_agent: "prompt_optimizer".to_string(),
            default_agent: "assistant".to_string(),
            webhook_url: None,
            cycle_interval_secs: DEFAULT_CYCLE_INTERVAL_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = OptimizerConfig::default().validated().unwrap();
        assert_eq!(config.passing_score, DEFAULT_PASSING_SCORE);
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        assert!(OptimizerConfig::default()
            .with_passing_score(11)
            .validated()
            .is_err());
        assert!(OptimizerConfig::default()
            .with_passing_score(0)
            .validated()
            .is_err());
        assert!(OptimizerConfig::default()
            .with_max_attempts(0)
            .validated()
            .is_err());
    }
}
