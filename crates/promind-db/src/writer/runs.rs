//! Agent run log operations
//!
//! Append-only; rows are never updated or deleted.

use crate::error::{Result, StoreError};
use promind_types::AgentRunRecord;
use tracing::debug;

use super::core::DatabaseWriter;

impl DatabaseWriter {
    /// Append one run record to the audit log
    pub async fn insert_run(&self, run: &AgentRunRecord) -> Result<()> {
        debug!(
            agent_name = %run.agent_name,
            prompt_version = run.prompt_version,
            is_successful = run.is_successful,
            "Recording agent run"
        );

        let extra = serde_json::to_string(&run.extra)?;

        // Score column stays NULL for unevaluated runs
        match run.effectiveness_score {
            Some(score) => {
                self.conn
                    .execute(
                        "INSERT INTO agent_runs
                         (id, agent_name, input, output, prompt_version, is_successful, effectiveness_score, extra, created_at)
                         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                        [
                            run.id.to_string(),
                            run.agent_name.clone(),
                            run.input.clone(),
                            run.output.clone(),
                            run.prompt_version.to_string(),
                            if run.is_successful { "1" } else { "0" }.to_string(),
                            score.to_string(),
                            extra,
                            run.created_at.to_rfc3339(),
                        ],
                    )
                    .await
            }
            None => {
                self.conn
                    .execute(
                        "INSERT INTO agent_runs
                         (id, agent_name, input, output, prompt_version, is_successful, extra, created_at)
                         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                        [
                            run.id.to_string(),
                            run.agent_name.clone(),
                            run.input.clone(),
                            run.output.clone(),
                            run.prompt_version.to_string(),
                            if run.is_successful { "1" } else { "0" }.to_string(),
                            extra,
                            run.created_at.to_rfc3339(),
                        ],
                    )
                    .await
            }
        }
        .map_err(|e| StoreError::operation_with_source("Failed to insert agent run", e))?;

        Ok(())
    }
}
