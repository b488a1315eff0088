//! Application context
//!
//! Everything with process lifetime is constructed exactly once here and
//! injected into the components that need it; no module-level singletons.

use anyhow::{Context, Result};
use std::sync::Arc;

use promind_agent::{AgentFactory, ProviderConfig};
use promind_db::DatabaseWriter;
use promind_orchestrator::{
    ChatGateway, EffectivenessScorer, NullNotifier, Notifier, OptimizationController,
    OptimizerConfig, PromptRewriter, PromptTemplates, WebhookNotifier,
};

/// Long-lived state shared by all runner commands
pub struct AppContext {
    pub store: Arc<DatabaseWriter>,
    pub config: OptimizerConfig,
    factory: Arc<AgentFactory>,
}

impl AppContext {
    /// Build the context from an open store and validated configuration
    pub fn new(store: Arc<DatabaseWriter>, config: OptimizerConfig) -> Self {
        let provider = ProviderConfig::from_env();
        let factory = Arc::new(AgentFactory::new(store.clone(), provider));
        Self {
            store,
            config,
            factory,
        }
    }

    /// Assemble a controller with freshly resolved evaluator and optimizer
    /// runtimes, so prompt changes to either take effect per cycle.
    pub async fn build_controller(&self) -> Result<OptimizationController> {
        let templates = Arc::new(PromptTemplates::new()?);

        let evaluator = self
            .factory
            .create(&self.config.evaluator_agent)
            .await
            .with_context(|| {
                format!(
                    "Evaluator agent '{}' is not runnable",
                    self.config.evaluator_agent
                )
            })?;
        let optimizer = self
            .factory
            .create(&self.config.optimizer_agent)
            .await
            .with_context(|| {
                format!(
                    "Optimizer agent '{}' is not runnable",
                    self.config.optimizer_agent
                )
            })?;

        let notifier: Arc<dyn Notifier> = match &self.config.webhook_url {
            Some(url) => Arc::new(WebhookNotifier::new(Some(url.clone()))),
            None => Arc::new(NullNotifier),
        };

        Ok(OptimizationController::new(
            self.store.clone(),
            self.factory.clone(),
            EffectivenessScorer::new(evaluator, templates.clone()),
            PromptRewriter::new(optimizer, templates),
            notifier,
            self.config.clone(),
        ))
    }

    /// Assemble the chat gateway
    pub fn build_gateway(&self) -> ChatGateway {
        ChatGateway::new(
            self.store.clone(),
            self.factory.clone(),
            self.config.default_agent.clone(),
        )
    }
}
