//! Tests for the agent registry and the run log

use promind_db::{DatabaseConfig, DatabaseReader, DatabaseWriter};
use promind_types::{AgentDefinition, AgentRole, AgentRunRecord, LlmParams};
use tempfile::TempDir;

#[tokio::test]
async fn test_agent_upsert_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let db = DatabaseWriter::new(DatabaseConfig::new(db_path.to_string_lossy())).await?;

    let agent = AgentDefinition::new("planner", AgentRole::Planner, "plan projects", "qwen2.5-7b")
        .with_params(LlmParams {
            temperature: 0.4,
            top_p: 0.9,
            max_tokens: Some(1024),
        })
        .with_test_input("plan a book rental app");
    db.upsert_agent(&agent).await?;

    let loaded = db.get_agent("planner").await?;
    assert_eq!(loaded.id, agent.id);
    assert_eq!(loaded.role, AgentRole::Planner);
    assert_eq!(loaded.params.max_tokens, Some(1024));
    assert_eq!(loaded.test_input.as_deref(), Some("plan a book rental app"));

    // Re-register under the same name: fields update, id survives
    let updated = AgentDefinition::new("planner", AgentRole::Planner, "plan anything", "mixtral-8x7b")
        .with_optimize_prompt(false);
    db.upsert_agent(&updated).await?;

    let loaded = db.get_agent("planner").await?;
    assert_eq!(loaded.id, agent.id);
    assert_eq!(loaded.goal, "plan anything");
    assert_eq!(loaded.model, "mixtral-8x7b");
    assert!(!loaded.optimize_prompt);
    assert!(loaded.test_input.is_none());

    Ok(())
}

#[tokio::test]
async fn test_list_agents_optimizable_filter() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let db = DatabaseWriter::new(DatabaseConfig::new(db_path.to_string_lossy())).await?;

    db.upsert_agent(&AgentDefinition::new(
        "planner",
        AgentRole::Planner,
        "plan",
        "qwen2.5-7b",
    ))
    .await?;
    db.upsert_agent(
        &AgentDefinition::new("evaluator", AgentRole::Evaluator, "score", "qwen2.5-7b")
            .with_optimize_prompt(false),
    )
    .await?;

    assert_eq!(db.list_agents(false).await?.len(), 2);

    let optimizable = db.list_agents(true).await?;
    assert_eq!(optimizable.len(), 1);
    assert_eq!(optimizable[0].name, "planner");

    Ok(())
}

#[tokio::test]
async fn test_run_log_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let db = DatabaseWriter::new(DatabaseConfig::new(db_path.to_string_lossy())).await?;

    let scored = AgentRunRecord::new("planner", "plan a blog", "1. pick a stack", 3)
        .with_score(6.0)
        .with_extra(serde_json::json!({ "model": "qwen2.5-7b" }));
    db.insert_run(&scored).await?;

    let failed = AgentRunRecord::failed("planner", "plan a blog", 3, "model timed out");
    db.insert_run(&failed).await?;

    let reader = DatabaseReader::from_config(DatabaseConfig::new(db_path.to_string_lossy())).await?;
    let runs = reader.get_recent_runs("planner", 10).await?;
    assert_eq!(runs.len(), 2);

    let scored_back = runs.iter().find(|r| r.id == scored.id).unwrap();
    assert!(scored_back.is_successful);
    assert_eq!(scored_back.effectiveness_score, Some(6.0));
    assert_eq!(scored_back.extra["model"], "qwen2.5-7b");
    assert_eq!(scored_back.prompt_version, 3);

    let failed_back = runs.iter().find(|r| r.id == failed.id).unwrap();
    assert!(!failed_back.is_successful);
    assert!(failed_back.effectiveness_score.is_none());
    assert_eq!(failed_back.extra["error"], "model timed out");

    Ok(())
}
