//! Prompt store operations
//!
//! Resolution of the active prompt for an (agent, task type) key and the
//! transactional version swap that keeps the single-active-row invariant.

use crate::error::{Result, StoreError};
use chrono::{DateTime, Utc};
use promind_types::PromptRecord;
use tracing::{info, warn};
use uuid::Uuid;

use super::core::DatabaseWriter;

const PROMPT_COLUMNS: &str =
    "id, agent_name, task_type, version, system_prompt, is_active, effectiveness_score, created_at";

pub(crate) fn prompt_from_row(row: &turso::Row) -> Result<PromptRecord> {
    let id: String = row.get(0)?;
    let agent_name: String = row.get(1)?;
    let task_type: String = row.get(2)?;
    let version: i64 = row.get(3)?;
    let system_prompt: String = row.get(4)?;
    let is_active: i64 = row.get(5)?;
    let effectiveness_score: Option<f64> = row.get(6)?;
    let created_at: String = row.get(7)?;

    Ok(PromptRecord {
        id: Uuid::parse_str(&id)
            .map_err(|e| StoreError::validation("id", format!("invalid uuid: {e}")))?,
        agent_name,
        task_type,
        version,
        system_prompt,
        is_active: is_active != 0,
        effectiveness_score,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| StoreError::validation("created_at", format!("invalid timestamp: {e}")))?
            .with_timezone(&Utc),
    })
}

impl DatabaseWriter {
    /// Resolve the single active prompt for an (agent, task type) key.
    ///
    /// Fails with [`StoreError::NotFound`] when no active row exists or when
    /// the stored text is empty, since generation cannot proceed either way.
    pub async fn get_latest_prompt(&self, agent_name: &str, task_type: &str) -> Result<PromptRecord> {
        let mut rows = self
            .conn
            .query(
                &format!(
                    "SELECT {PROMPT_COLUMNS} FROM prompts
                     WHERE agent_name = ? AND task_type = ? AND is_active = 1
                     ORDER BY version DESC LIMIT 1"
                ),
                [agent_name, task_type],
            )
            .await
            .map_err(|e| StoreError::query("Failed to query active prompt", e))?;

        let Some(row) = rows.next().await? else {
            warn!(
                agent_name = %agent_name,
                task_type = %task_type,
                "No active prompt found"
            );
            return Err(StoreError::not_found(
                format!("{agent_name}/{task_type}"),
                "prompts",
            ));
        };

        let prompt = prompt_from_row(&row)?;
        if prompt.system_prompt.trim().is_empty() {
            warn!(agent_name = %agent_name, "Active prompt has empty text");
            return Err(StoreError::not_found(
                format!("{agent_name}/{task_type} (empty prompt)"),
                "prompts",
            ));
        }

        Ok(prompt)
    }

    /// Register a replacement prompt version and deactivate the old one.
    ///
    /// Both changes commit as one transaction, so readers never observe zero
    /// or two active rows for the same key.
    pub async fn register_prompt_version(
        &self,
        old_prompt: &PromptRecord,
        new_text: &str,
    ) -> Result<PromptRecord> {
        if new_text.trim().is_empty() {
            return Err(StoreError::validation(
                "system_prompt",
                "replacement prompt text is empty",
            ));
        }

        let new_prompt = old_prompt.next_version(new_text.trim());
        let prompt_md5 = format!("{:x}", md5::compute(&new_prompt.system_prompt));

        self.conn
            .execute("BEGIN", ())
            .await
            .map_err(|e| StoreError::transaction_with_source("Failed to begin version swap", e))?;

        let swap = async {
            self.conn
                .execute(
                    "UPDATE prompts SET is_active = 0 WHERE id = ?",
                    [old_prompt.id.to_string()],
                )
                .await
                .map_err(|e| StoreError::query("Failed to deactivate old prompt", e))?;

            self.conn
                .execute(
                    "INSERT INTO prompts
                     (id, agent_name, task_type, version, system_prompt, is_active, prompt_md5, created_at)
                     VALUES (?, ?, ?, ?, ?, 1, ?, ?)",
                    [
                        new_prompt.id.to_string(),
                        new_prompt.agent_name.clone(),
                        new_prompt.task_type.clone(),
                        new_prompt.version.to_string(),
                        new_prompt.system_prompt.clone(),
                        prompt_md5,
                        new_prompt.created_at.to_rfc3339(),
                    ],
                )
                .await
                .map_err(|e| StoreError::query("Failed to insert new prompt version", e))?;

            Ok::<(), StoreError>(())
        }
        .await;

        if let Err(e) = swap {
            let _ = self.conn.execute("ROLLBACK", ()).await;
            return Err(e);
        }

        self.conn
            .execute("COMMIT", ())
            .await
            .map_err(|e| StoreError::transaction_with_source("Failed to commit version swap", e))?;

        info!(
            agent_name = %new_prompt.agent_name,
            version = new_prompt.version,
            "Registered new prompt version"
        );
        Ok(new_prompt)
    }

    /// Update the effectiveness score in place on the active row.
    ///
    /// Side effect only; does not create a version.
    pub async fn update_effectiveness_score(
        &self,
        agent_name: &str,
        task_type: &str,
        score: f64,
    ) -> Result<()> {
        let prompt = self.get_latest_prompt(agent_name, task_type).await?;

        self.conn
            .execute(
                "UPDATE prompts SET effectiveness_score = ? WHERE id = ?",
                [score.to_string(), prompt.id.to_string()],
            )
            .await
            .map_err(|e| {
                StoreError::operation_with_source("Failed to update effectiveness score", e)
            })?;

        info!(
            agent_name = %agent_name,
            score = score,
            "Updated effectiveness score on active prompt"
        );
        Ok(())
    }

    /// Create the version-1 active prompt for a key if none exists yet.
    ///
    /// Idempotent: an existing version chain is left untouched and returned.
    pub async fn bootstrap_prompt(
        &self,
        agent_name: &str,
        task_type: &str,
        text: &str,
    ) -> Result<PromptRecord> {
        if text.trim().is_empty() {
            return Err(StoreError::validation(
                "system_prompt",
                "bootstrap prompt text is empty",
            ));
        }

        match self.get_latest_prompt(agent_name, task_type).await {
            Ok(existing) => return Ok(existing),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }

        let prompt = PromptRecord::bootstrap(agent_name, task_type, text.trim());
        let prompt_md5 = format!("{:x}", md5::compute(&prompt.system_prompt));

        self.conn
            .execute(
                "INSERT INTO prompts
                 (id, agent_name, task_type, version, system_prompt, is_active, prompt_md5, created_at)
                 VALUES (?, ?, ?, ?, ?, 1, ?, ?)",
                [
                    prompt.id.to_string(),
                    prompt.agent_name.clone(),
                    prompt.task_type.clone(),
                    prompt.version.to_string(),
                    prompt.system_prompt.clone(),
                    prompt_md5,
                    prompt.created_at.to_rfc3339(),
                ],
            )
            .await
            .map_err(|e| StoreError::operation_with_source("Failed to bootstrap prompt", e))?;

        info!(agent_name = %agent_name, task_type = %task_type, "Bootstrapped prompt v1");
        Ok(prompt)
    }
}
