//! Database reader module for promind-db
//!
//! Read-only queries for inspection: prompt version history and recent run
//! records. Mutations live in [`crate::writer`].

use crate::{
    error::{Result, StoreError},
    writer::prompts::prompt_from_row,
};
use chrono::{DateTime, Utc};
use promind_types::{AgentRunRecord, PromptRecord};
use tracing::debug;
use uuid::Uuid;

/// Database reader for efficient read operations
pub struct DatabaseReader {
    conn: turso::Connection,
}

impl DatabaseReader {
    /// Create a new database reader with an existing connection
    pub fn new(conn: turso::Connection) -> Self {
        Self { conn }
    }

    /// Create a new database reader from configuration
    pub async fn from_config(config: crate::DatabaseConfig) -> Result<Self> {
        let db = turso::Builder::new_local(&config.path)
            .build()
            .await
            .map_err(|e| {
                StoreError::connection_with_source(
                    format!("Failed to create local database: {}", config.path),
                    e,
                )
            })?;

        let conn = db.connect().map_err(|e| {
            StoreError::connection_with_source("Failed to establish database connection", e)
        })?;

        Ok(Self { conn })
    }

    /// Full version chain for an (agent, task type) key, newest first
    pub async fn get_prompt_history(
        &self,
        agent_name: &str,
        task_type: &str,
    ) -> Result<Vec<PromptRecord>> {
        debug!(agent_name = %agent_name, task_type = %task_type, "Reading prompt history");

        let mut rows = self
            .conn
            .query(
                "SELECT id, agent_name, task_type, version, system_prompt, is_active, effectiveness_score, created_at
                 FROM prompts
                 WHERE agent_name = ? AND task_type = ?
                 ORDER BY version DESC",
                [agent_name, task_type],
            )
            .await
            .map_err(|e| StoreError::query("Failed to query prompt history", e))?;

        let mut prompts = Vec::new();
        while let Some(row) = rows.next().await? {
            prompts.push(prompt_from_row(&row)?);
        }
        Ok(prompts)
    }

    /// Most recent run records for an agent, newest first
    pub async fn get_recent_runs(&self, agent_name: &str, limit: i64) -> Result<Vec<AgentRunRecord>> {
        debug!(agent_name = %agent_name, limit = limit, "Reading recent runs");

        let mut rows = self
            .conn
            .query(
                "SELECT id, agent_name, input, output, prompt_version, is_successful, effectiveness_score, extra, created_at
                 FROM agent_runs
                 WHERE agent_name = ?
                 ORDER BY created_at DESC
                 LIMIT ?",
                [agent_name.to_string(), limit.to_string()],
            )
            .await
            .map_err(|e| StoreError::query("Failed to query agent runs", e))?;

        let mut runs = Vec::new();
        while let Some(row) = rows.next().await? {
            runs.push(run_from_row(&row)?);
        }
        Ok(runs)
    }
}

fn run_from_row(row: &turso::Row) -> Result<AgentRunRecord> {
    let id: String = row.get(0)?;
    let agent_name: String = row.get(1)?;
    let input: String = row.get(2)?;
    let output: String = row.get(3)?;
    let prompt_version: i64 = row.get(4)?;
    let is_successful: i64 = row.get(5)?;
    let effectiveness_score: Option<f64> = row.get(6)?;
    let extra: Option<String> = row.get(7)?;
    let created_at: String = row.get(8)?;

    Ok(AgentRunRecord {
        id: Uuid::parse_str(&id)
            .map_err(|e| StoreError::validation("id", format!("invalid uuid: {e}")))?,
        agent_name,
        input,
        output,
        prompt_version,
        is_successful: is_successful != 0,
        effectiveness_score,
        extra: extra
            .filter(|s| !s.is_empty())
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or(serde_json::Value::Null),
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| StoreError::validation("created_at", format!("invalid timestamp: {e}")))?
            .with_timezone(&Utc),
    })
}
