//! Agent factory
//!
//! Resolves an agent name into a live runtime: definition row from the
//! registry, active system prompt from the prompt store, bound to the
//! configured completion endpoint.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::{config::ProviderConfig, error::AgentError, runtime::AgentRuntime, runtime::LlmAgent};
use promind_db::DatabaseWriter;
use promind_types::{AgentDefinition, DEFAULT_TASK_TYPE};

/// Binds a definition plus an explicit system prompt to a runnable agent.
///
/// The controller re-binds on every attempt so a freshly registered prompt
/// version takes effect immediately; tests substitute scripted runtimes here.
#[async_trait]
pub trait AgentBinder: Send + Sync {
    async fn bind(
        &self,
        definition: &AgentDefinition,
        system_prompt: &str,
    ) -> Result<Box<dyn AgentRuntime>, AgentError>;
}

/// Production factory backed by the store and one endpoint configuration
pub struct AgentFactory {
    store: Arc<DatabaseWriter>,
    provider: ProviderConfig,
}

impl AgentFactory {
    /// Create a factory over the given store and endpoint
    pub fn new(store: Arc<DatabaseWriter>, provider: ProviderConfig) -> Self {
        Self { store, provider }
    }

    /// Resolve an agent by name with its current active prompt.
    ///
    /// Fails when the agent is unknown or has no active prompt, since an
    /// agent without instructions cannot generate.
    pub async fn create(&self, agent_name: &str) -> Result<Box<dyn AgentRuntime>, AgentError> {
        let definition = self.store.get_agent(agent_name).await.map_err(|e| {
            AgentError::configuration(format!("Agent '{agent_name}' not found: {e}"))
        })?;

        let prompt = self
            .store
            .get_latest_prompt(agent_name, DEFAULT_TASK_TYPE)
            .await
            .map_err(|e| {
                AgentError::configuration(format!(
                    "No active prompt for agent '{agent_name}': {e}"
                ))
            })?;

        debug!(
            "[AgentFactory] Resolved '{}' with prompt v{}",
            agent_name, prompt.version
        );
        Ok(Box::new(LlmAgent::new(
            &definition,
            prompt.system_prompt,
            self.provider.clone(),
        )))
    }
}

#[async_trait]
impl AgentBinder for AgentFactory {
    async fn bind(
        &self,
        definition: &AgentDefinition,
        system_prompt: &str,
    ) -> Result<Box<dyn AgentRuntime>, AgentError> {
        Ok(Box::new(LlmAgent::new(
            definition,
            system_prompt,
            self.provider.clone(),
        )))
    }
}
