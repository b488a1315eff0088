//! Effectiveness scorer
//!
//! Asks the designated evaluator agent to rate a response 1-10 and extracts
//! the integer from its free-form reply. Every failure path resolves to the
//! minimum score so the controller always has a comparable value: an
//! evaluator outage reads as "needs improvement", never as "skip".

use regex::Regex;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::templates::PromptTemplates;
use promind_agent::AgentRuntime;

/// Worst score, used whenever no real score can be produced
pub const MIN_SCORE: u8 = 1;

/// Best score on the evaluation scale
pub const MAX_SCORE: u8 = 10;

/// Scores (system prompt, user input, response) triples via an evaluator agent
pub struct EffectivenessScorer {
    evaluator: Box<dyn AgentRuntime>,
    templates: Arc<PromptTemplates>,
    score_pattern: Regex,
}

impl EffectivenessScorer {
    /// Create a scorer around the designated evaluator runtime
    pub fn new(evaluator: Box<dyn AgentRuntime>, templates: Arc<PromptTemplates>) -> Self {
        Self {
            evaluator,
            templates,
            score_pattern: Regex::new(r"\b(10|[1-9])\b").expect("valid score pattern"),
        }
    }

    /// Produce a score in [1, 10] for one evaluated exchange.
    ///
    /// Returns [`MIN_SCORE`] when the response is empty, the evaluator call
    /// fails, or its reply contains no parseable integer.
    pub async fn score(&self, system_prompt: &str, user_input: &str, response: &str) -> u8 {
        if response.trim().is_empty() {
            warn!("[Scorer] Empty response, assigning minimum score");
            return MIN_SCORE;
        }

        let instruction = match self
            .templates
            .render_evaluate(system_prompt, user_input, response)
        {
            Ok(rendered) => rendered,
            Err(e) => {
                warn!("[Scorer] Failed to render evaluation instruction: {e}");
                return MIN_SCORE;
            }
        };

        let reply = match self.evaluator.run(&instruction).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("[Scorer] Evaluator call failed: {e}");
                return MIN_SCORE;
            }
        };

        let score = self.extract_score(&reply);
        debug!(
            "[Scorer] Evaluator '{}' replied {:?} -> score {}",
            self.evaluator.name(),
            reply.trim(),
            score
        );
        score
    }

    /// Extract the first 1-10 integer from the evaluator's reply
    fn extract_score(&self, reply: &str) -> u8 {
        let Some(captures) = self.score_pattern.captures(reply) else {
            warn!("[Scorer] No integer found in evaluator reply: {reply:?}");
            return MIN_SCORE;
        };

        captures[1]
            .parse::<u8>()
            .map(|s| s.clamp(MIN_SCORE, MAX_SCORE))
            .unwrap_or(MIN_SCORE)
    }
}
