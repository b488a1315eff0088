//! Chat gateway
//!
//! Entry point for free-text commands from a chat front end. Parses the
//! `agent: <name> | input: <text>` convention, falls back to the default
//! agent for anything else, and dispatches the run through the agent binder.

use anyhow::Context;
use regex::Regex;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

use crate::Result;
use promind_agent::AgentBinder;
use promind_db::DatabaseWriter;
use promind_types::{AgentRunRecord, DEFAULT_TASK_TYPE};

/// A chat message resolved into an (agent, input) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub agent_name: String,
    pub input: String,
}

/// Parses chat text and runs the addressed agent
pub struct ChatGateway {
    store: Arc<DatabaseWriter>,
    binder: Arc<dyn AgentBinder>,
    default_agent: String,
    command_pattern: Regex,
}

impl ChatGateway {
    /// Create a gateway routing unmatched text to `default_agent`
    pub fn new(
        store: Arc<DatabaseWriter>,
        binder: Arc<dyn AgentBinder>,
        default_agent: impl Into<String>,
    ) -> Self {
        Self {
            store,
            binder,
            default_agent: default_agent.into(),
            command_pattern: Regex::new(r"(?is)^\s*agent:\s*(\w+)\s*\|\s*input:\s*(.+)$")
                .expect("valid command pattern"),
        }
    }

    /// Resolve free text into an (agent, input) pair.
    ///
    /// The `agent: <name> | input: <text>` convention is matched
    /// case-insensitively; anything else is routed verbatim to the default
    /// agent.
    pub fn parse(&self, text: &str) -> ParsedCommand {
        if let Some(captures) = self.command_pattern.captures(text) {
            return ParsedCommand {
                agent_name: captures[1].to_string(),
                input: captures[2].trim().to_string(),
            };
        }

        ParsedCommand {
            agent_name: self.default_agent.clone(),
            input: text.trim().to_string(),
        }
    }

    /// Parse one message, run the addressed agent, and log the run.
    ///
    /// Fails when the addressed agent is unknown, has no active prompt, or
    /// the generation call errors; the front end surfaces the message as-is.
    pub async fn handle_message(&self, text: &str) -> Result<String> {
        let command = self.parse(text);
        info!(
            "[Gateway] Dispatching to agent '{}' ({} input chars)",
            command.agent_name,
            command.input.len()
        );

        let agent = self
            .store
            .get_agent(&command.agent_name)
            .await
            .with_context(|| format!("Unknown agent '{}'", command.agent_name))?;
        let prompt = self
            .store
            .get_latest_prompt(&agent.name, DEFAULT_TASK_TYPE)
            .await
            .with_context(|| format!("No active prompt for agent '{}'", agent.name))?;

        let runtime = self.binder.bind(&agent, &prompt.system_prompt).await?;
        let output = runtime
            .run(&command.input)
            .await
            .with_context(|| format!("Agent '{}' failed", agent.name))?;

        debug!(
            "[Gateway] Agent '{}' replied with {} chars",
            agent.name,
            output.len()
        );

        let run = AgentRunRecord::new(&agent.name, &command.input, &output, prompt.version)
            .with_extra(json!({
                "source": "chat",
                "model": agent.model,
                "prompt_id": prompt.id.to_string(),
            }));
        self.store
            .insert_run(&run)
            .await
            .context("Failed to record chat run")?;

        Ok(output)
    }
}
