//! Agent runtime over the Rig completion framework
//!
//! `AgentRuntime` is the capability seam: the orchestrator only ever needs
//! "given input text, produce output text". `LlmAgent` is the production
//! implementation against an OpenAI-compatible endpoint.

use async_trait::async_trait;
use rig::{completion::Prompt, prelude::*, providers::openai::Client};
use tracing::{debug, info};

use crate::{config::ProviderConfig, error::AgentError};
use promind_types::{AgentDefinition, LlmParams};

/// Narrow capability interface the controller depends on
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Stable agent name, used for logging and run records
    fn name(&self) -> &str;

    /// Model identifier behind this runtime
    fn model(&self) -> &str;

    /// Run the agent on one input and return the generated text
    async fn run(&self, input: &str) -> Result<String, AgentError>;
}

/// An agent bound to a completion model via the Rig framework
pub struct LlmAgent {
    name: String,
    model: String,
    system_prompt: String,
    params: LlmParams,
    provider: ProviderConfig,
}

impl LlmAgent {
    /// Bind a definition and its resolved system prompt to a live endpoint
    pub fn new(
        definition: &AgentDefinition,
        system_prompt: impl Into<String>,
        provider: ProviderConfig,
    ) -> Self {
        info!(
            "[LlmAgent] Binding agent '{}' to model '{}'",
            definition.name, definition.model
        );
        Self {
            name: definition.name.clone(),
            model: definition.model.clone(),
            system_prompt: system_prompt.into(),
            params: definition.params.clone(),
            provider,
        }
    }
}

#[async_trait]
impl AgentRuntime for LlmAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn run(&self, input: &str) -> Result<String, AgentError> {
        debug!(
            "[LlmAgent] Agent '{}' prompting model '{}' ({} input chars)",
            self.name,
            self.model,
            input.len()
        );

        let client = Client::builder(&self.provider.api_key)
            .base_url(&self.provider.api_url)
            .build()
            .map_err(|e| {
                AgentError::configuration(format!("Failed to build completion client: {e}"))
            })?;

        let mut builder = client
            .completion_model(&self.model)
            .completions_api()
            .into_agent_builder()
            .preamble(&self.system_prompt)
            .temperature(self.params.temperature);

        if let Some(max_tokens) = self.params.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }

        let agent = builder.build();

        let response = agent
            .prompt(input)
            .await
            .map_err(|e| AgentError::generation(&self.name, e.to_string()))?;

        let text = response.to_string();
        debug!(
            "[LlmAgent] Agent '{}' produced {} chars",
            self.name,
            text.len()
        );
        Ok(text)
    }
}
