//! Agent registry operations

use crate::error::{Result, StoreError};
use chrono::{DateTime, Utc};
use promind_types::{AgentDefinition, AgentRole, LlmParams};
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

use super::core::DatabaseWriter;

const AGENT_COLUMNS: &str =
    "id, name, role, goal, model, optimize_prompt, params, test_input, created_at";

pub(crate) fn agent_from_row(row: &turso::Row) -> Result<AgentDefinition> {
    let id: String = row.get(0)?;
    let name: String = row.get(1)?;
    let role: String = row.get(2)?;
    let goal: String = row.get(3)?;
    let model: String = row.get(4)?;
    let optimize_prompt: i64 = row.get(5)?;
    let params: String = row.get(6)?;
    let test_input: Option<String> = row.get(7)?;
    let created_at: String = row.get(8)?;

    let params: LlmParams = serde_json::from_str(&params)?;
    // Empty string round-trips from a None test_input
    let test_input = test_input.filter(|s| !s.is_empty());

    Ok(AgentDefinition {
        id: Uuid::parse_str(&id)
            .map_err(|e| StoreError::validation("id", format!("invalid uuid: {e}")))?,
        role: AgentRole::from_str(&role)
            .map_err(|e| StoreError::validation("role", format!("unknown role '{role}': {e}")))?,
        name,
        goal,
        model,
        optimize_prompt: optimize_prompt != 0,
        params,
        test_input,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| StoreError::validation("created_at", format!("invalid timestamp: {e}")))?
            .with_timezone(&Utc),
    })
}

impl DatabaseWriter {
    /// Insert or update an agent definition, keyed by name.
    ///
    /// The name is the stable handle; a re-register updates everything else
    /// in place and keeps the original row id.
    pub async fn upsert_agent(&self, agent: &AgentDefinition) -> Result<()> {
        let params = serde_json::to_string(&agent.params)?;

        self.conn
            .execute(
                "INSERT INTO agents (id, name, role, goal, model, optimize_prompt, params, test_input, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                 ON CONFLICT(name) DO UPDATE SET
                     role = excluded.role,
                     goal = excluded.goal,
                     model = excluded.model,
                     optimize_prompt = excluded.optimize_prompt,
                     params = excluded.params,
                     test_input = excluded.test_input",
                [
                    agent.id.to_string(),
                    agent.name.clone(),
                    agent.role.to_string(),
                    agent.goal.clone(),
                    agent.model.clone(),
                    if agent.optimize_prompt { "1" } else { "0" }.to_string(),
                    params,
                    agent.test_input.clone().unwrap_or_default(),
                    agent.created_at.to_rfc3339(),
                ],
            )
            .await
            .map_err(|e| StoreError::operation_with_source("Failed to upsert agent", e))?;

        info!(agent_name = %agent.name, role = %agent.role, "Agent registered");
        Ok(())
    }

    /// Fetch one agent definition by name
    pub async fn get_agent(&self, name: &str) -> Result<AgentDefinition> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {AGENT_COLUMNS} FROM agents WHERE name = ? LIMIT 1"),
                [name],
            )
            .await
            .map_err(|e| StoreError::query("Failed to query agent", e))?;

        match rows.next().await? {
            Some(row) => agent_from_row(&row),
            None => Err(StoreError::not_found(name, "agents")),
        }
    }

    /// List registered agents, optionally only those with optimization enabled
    pub async fn list_agents(&self, optimizable_only: bool) -> Result<Vec<AgentDefinition>> {
        let query = if optimizable_only {
            format!("SELECT {AGENT_COLUMNS} FROM agents WHERE optimize_prompt = 1 ORDER BY name")
        } else {
            format!("SELECT {AGENT_COLUMNS} FROM agents ORDER BY name")
        };

        let mut rows = self
            .conn
            .query(&query, ())
            .await
            .map_err(|e| StoreError::query("Failed to list agents", e))?;

        let mut agents = Vec::new();
        while let Some(row) = rows.next().await? {
            agents.push(agent_from_row(&row)?);
        }
        Ok(agents)
    }
}
