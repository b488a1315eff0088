//! Prompt rewriter
//!
//! Asks the designated optimizer agent for a replacement system prompt.
//! Unlike scoring, a rewrite failure propagates: the caller decides whether
//! to keep the old prompt, not this module.

use anyhow::Context;
use std::sync::Arc;
use tracing::{debug, info};

use crate::{templates::PromptTemplates, Result};
use promind_agent::AgentRuntime;
use promind_types::{AgentDefinition, PromptRecord};

/// Rewrites under-performing system prompts via an optimizer agent
pub struct PromptRewriter {
    optimizer: Box<dyn AgentRuntime>,
    templates: Arc<PromptTemplates>,
}

impl PromptRewriter {
    /// Create a rewriter around the designated optimizer runtime
    pub fn new(optimizer: Box<dyn AgentRuntime>, templates: Arc<PromptTemplates>) -> Self {
        Self {
            optimizer,
            templates,
        }
    }

    /// Produce an improved prompt text for one failing exchange.
    ///
    /// Returns the optimizer's reply trimmed of surrounding whitespace.
    /// Semantic quality is not validated here; the next scoring cycle is the
    /// judge.
    pub async fn rewrite(
        &self,
        agent: &AgentDefinition,
        current: &PromptRecord,
        user_input: &str,
        response: &str,
        score: u8,
    ) -> Result<String> {
        info!(
            "[Rewriter] Rewriting prompt v{} for agent '{}' (score {})",
            current.version, agent.name, score
        );

        let instruction = self.templates.render_rewrite(
            &agent.name,
            &agent.goal,
            current.version,
            &current.system_prompt,
            user_input,
            response,
            score,
        )?;

        let improved = self
            .optimizer
            .run(&instruction)
            .await
            .with_context(|| format!("Optimizer call failed for agent '{}'", agent.name))?;

        let improved = improved.trim().to_string();
        debug!(
            "[Rewriter] Optimizer '{}' produced {} chars",
            self.optimizer.name(),
            improved.len()
        );
        Ok(improved)
    }
}
