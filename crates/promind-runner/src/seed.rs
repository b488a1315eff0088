//! Seed-file loading
//!
//! Registers agent definitions and bootstraps their version-1 prompts from a
//! YAML file. Safe to re-run: existing prompt chains are never touched.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use promind_db::DatabaseWriter;
use promind_types::{AgentDefinition, AgentRole, LlmParams, DEFAULT_TASK_TYPE};

/// One agent entry in the seed file
#[derive(Debug, Deserialize)]
pub struct AgentSeed {
    pub name: String,
    pub role: AgentRole,
    pub goal: String,
    pub model: String,
    #[serde(default = "default_optimize_prompt")]
    pub optimize_prompt: bool,
    #[serde(default)]
    pub params: Option<LlmParams>,
    #[serde(default)]
    pub test_input: Option<String>,
    pub system_prompt: String,
}

fn default_optimize_prompt() -> bool {
    true
}

/// What a seed pass actually did
#[derive(Debug, Default)]
pub struct SeedReport {
    pub agents: usize,
    pub prompts: usize,
}

/// Load a seed file and register everything it contains
pub async fn seed_from_file(store: &DatabaseWriter, path: &Path) -> Result<SeedReport> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open seed file {}", path.display()))?;
    let seeds: Vec<AgentSeed> = serde_yaml::from_reader(file)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))?;

    let mut report = SeedReport::default();
    for seed in seeds {
        info!("Seeding agent '{}'", seed.name);

        let mut definition =
            AgentDefinition::new(&seed.name, seed.role, &seed.goal, &seed.model)
                .with_optimize_prompt(seed.optimize_prompt);
        if let Some(params) = seed.params {
            definition = definition.with_params(params);
        }
        if let Some(test_input) = &seed.test_input {
            definition = definition.with_test_input(test_input);
        }

        store.upsert_agent(&definition).await?;
        report.agents += 1;

        store
            .bootstrap_prompt(&seed.name, DEFAULT_TASK_TYPE, &seed.system_prompt)
            .await?;
        report.prompts += 1;
    }

    Ok(report)
}
