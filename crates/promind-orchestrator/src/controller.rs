//! Optimization controller
//!
//! Drives the bounded run -> score -> rewrite -> persist -> notify loop for
//! one agent, and batches independent loops across agents under a global
//! one-permit semaphore so a shared local inference engine is never hit by
//! two optimizations at once.

use anyhow::Context;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::{
    config::OptimizerConfig,
    heuristics,
    notifier::Notifier,
    rewriter::PromptRewriter,
    scorer::{EffectivenessScorer, MIN_SCORE},
    Result,
};
use promind_agent::AgentBinder;
use promind_db::DatabaseWriter;
use promind_types::{
    AgentDefinition, AgentRunRecord, HaltReason, OptimizationEvent, OptimizationOutcome,
    DEFAULT_TASK_TYPE,
};

/// Orchestrates optimization attempts for agents
pub struct OptimizationController {
    store: Arc<DatabaseWriter>,
    binder: Arc<dyn AgentBinder>,
    scorer: EffectivenessScorer,
    rewriter: PromptRewriter,
    notifier: Arc<dyn Notifier>,
    config: OptimizerConfig,
    /// One optimization in flight system-wide
    permit: Semaphore,
}

impl OptimizationController {
    /// Create a controller over the given collaborators
    pub fn new(
        store: Arc<DatabaseWriter>,
        binder: Arc<dyn AgentBinder>,
        scorer: EffectivenessScorer,
        rewriter: PromptRewriter,
        notifier: Arc<dyn Notifier>,
        config: OptimizerConfig,
    ) -> Self {
        Self {
            store,
            binder,
            scorer,
            rewriter,
            notifier,
            config,
            permit: Semaphore::new(1),
        }
    }

    /// The input used to exercise an agent when none is supplied
    pub fn test_input_for(agent: &AgentDefinition) -> String {
        agent
            .test_input
            .clone()
            .unwrap_or_else(|| format!("Evaluate agent '{}' with a test prompt.", agent.name))
    }

    /// Run the bounded optimization loop for one agent.
    ///
    /// Generation and scoring failures are contained per attempt (worst-case
    /// score, loop continues); rewrite and persistence failures propagate and
    /// halt the loop. Notification failures never surface.
    pub async fn optimize_agent(
        &self,
        agent: &AgentDefinition,
        input: &str,
    ) -> Result<OptimizationOutcome> {
        info!(
            "[Controller] Starting optimization for agent '{}' (max {} attempts, passing score {})",
            agent.name, self.config.max_attempts, self.config.passing_score
        );

        let mut last_score = MIN_SCORE;
        let mut last_version = 0;

        for attempt in 1..=self.config.max_attempts {
            info!(
                "[Controller] Attempt {}/{} for '{}'",
                attempt, self.config.max_attempts, agent.name
            );

            // RUN_AGENT: resolve the active prompt and execute
            let prompt = self
                .store
                .get_latest_prompt(&agent.name, DEFAULT_TASK_TYPE)
                .await
                .with_context(|| format!("No usable prompt for agent '{}'", agent.name))?;
            last_version = prompt.version;

            let runtime = self.binder.bind(agent, &prompt.system_prompt).await?;
            let output = match runtime.run(input).await {
                Ok(output) => output,
                Err(e) => {
                    error!(
                        "[Controller] Agent '{}' failed on attempt {}: {e}",
                        agent.name, attempt
                    );
                    String::new()
                }
            };

            // SCORE: empty output and evaluator failures both resolve to the minimum
            let score = self
                .scorer
                .score(&prompt.system_prompt, input, &output)
                .await;
            last_score = score;
            info!(
                "[Controller] Effectiveness score for '{}': {}",
                agent.name, score
            );

            let run = AgentRunRecord::new(&agent.name, input, &output, prompt.version)
                .with_score(score as f64)
                .with_extra(json!({
                    "prompt_id": prompt.id.to_string(),
                    "model": agent.model,
                    "temperature": agent.params.temperature,
                    "output_weak": heuristics::is_output_weak(&output),
                }));
            self.store
                .insert_run(&run)
                .await
                .context("Failed to record agent run")?;
            self.store
                .update_effectiveness_score(&agent.name, DEFAULT_TASK_TYPE, score as f64)
                .await
                .context("Failed to record effectiveness score")?;

            // DONE: threshold reached
            if score >= self.config.passing_score {
                info!(
                    "[Controller] Agent '{}' passed with score {} on attempt {}",
                    agent.name, score, attempt
                );
                return Ok(OptimizationOutcome {
                    agent_name: agent.name.clone(),
                    attempts: attempt,
                    final_score: score,
                    final_version: prompt.version,
                    halt: HaltReason::Passed,
                });
            }

            // Terminal without rewrite when optimization is disabled
            if !agent.optimize_prompt {
                info!(
                    "[Controller] Agent '{}' scored {} but optimization is disabled",
                    agent.name, score
                );
                return Ok(OptimizationOutcome {
                    agent_name: agent.name.clone(),
                    attempts: attempt,
                    final_score: score,
                    final_version: prompt.version,
                    halt: HaltReason::OptimizationDisabled,
                });
            }

            // REWRITE -> PERSIST: failures here are fatal to the loop
            let improved = self
                .rewriter
                .rewrite(agent, &prompt, input, &output, score)
                .await?;
            let new_prompt = self
                .store
                .register_prompt_version(&prompt, &improved)
                .await
                .with_context(|| {
                    format!("Failed to persist improved prompt for '{}'", agent.name)
                })?;
            last_version = new_prompt.version;

            // NOTIFY: best effort, after the new version is durable
            let event = OptimizationEvent {
                agent_name: agent.name.clone(),
                prompt_id: prompt.id,
                version_old: prompt.version,
                version_new: new_prompt.version,
                score_old: prompt.effectiveness_score,
                score_new: Some(score as f64),
                model: agent.model.clone(),
                original: prompt.system_prompt.clone(),
                improved,
            };
            self.notifier.notify(&event).await;
        }

        warn!(
            "[Controller] Attempts exhausted for '{}' (last score {})",
            agent.name, last_score
        );
        Ok(OptimizationOutcome {
            agent_name: agent.name.clone(),
            attempts: self.config.max_attempts,
            final_score: last_score,
            final_version: last_version,
            halt: HaltReason::AttemptsExhausted,
        })
    }

    /// Optimize every optimization-enabled agent in its own isolated loop.
    ///
    /// One agent's failure is logged and never blocks the rest of the batch.
    pub async fn optimize_all(&self) -> Result<Vec<OptimizationOutcome>> {
        let agents = self
            .store
            .list_agents(true)
            .await
            .context("Failed to list optimizable agents")?;
        info!("[Controller] Optimizing {} agents", agents.len());

        let mut outcomes = Vec::new();
        for agent in agents {
            let input = Self::test_input_for(&agent);
            let _permit = self
                .permit
                .acquire()
                .await
                .expect("optimization semaphore closed");

            match self.optimize_agent(&agent, &input).await {
                Ok(outcome) => {
                    info!(
                        "[Controller] Agent '{}' finished: {} (score {}, v{})",
                        outcome.agent_name, outcome.halt, outcome.final_score, outcome.final_version
                    );
                    outcomes.push(outcome);
                }
                Err(e) => {
                    error!("[Controller] Failed to optimize '{}': {e:#}", agent.name);
                }
            }
        }
        Ok(outcomes)
    }
}
