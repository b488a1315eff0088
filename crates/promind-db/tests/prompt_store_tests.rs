//! Tests for the prompt store: active-row invariant, version monotonicity,
//! and in-place score updates.

use promind_db::{DatabaseConfig, DatabaseReader, DatabaseWriter};
use promind_types::DEFAULT_TASK_TYPE;
use tempfile::TempDir;

async fn writer(temp_dir: &TempDir) -> Result<DatabaseWriter, Box<dyn std::error::Error>> {
    let db_path = temp_dir.path().join("test.db");
    let config = DatabaseConfig::new(db_path.to_string_lossy());
    Ok(DatabaseWriter::new(config).await?)
}

#[tokio::test]
async fn test_bootstrap_creates_version_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = writer(&temp_dir).await?;

    let prompt = db
        .bootstrap_prompt("planner", DEFAULT_TASK_TYPE, "You are a planner.")
        .await?;
    assert_eq!(prompt.version, 1);
    assert!(prompt.is_active);

    let active = db.get_latest_prompt("planner", DEFAULT_TASK_TYPE).await?;
    assert_eq!(active.id, prompt.id);
    assert_eq!(active.system_prompt, "You are a planner.");

    Ok(())
}

#[tokio::test]
async fn test_bootstrap_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = writer(&temp_dir).await?;

    let first = db
        .bootstrap_prompt("planner", DEFAULT_TASK_TYPE, "You are a planner.")
        .await?;
    let second = db
        .bootstrap_prompt("planner", DEFAULT_TASK_TYPE, "Different text, ignored.")
        .await?;

    assert_eq!(first.id, second.id);
    assert_eq!(db.get_table_count("prompts").await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_missing_prompt_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = writer(&temp_dir).await?;

    let err = db
        .get_latest_prompt("ghost", DEFAULT_TASK_TYPE)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    Ok(())
}

#[tokio::test]
async fn test_empty_bootstrap_text_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = writer(&temp_dir).await?;

    assert!(db
        .bootstrap_prompt("planner", DEFAULT_TASK_TYPE, "   ")
        .await
        .is_err());

    Ok(())
}

#[tokio::test]
async fn test_single_active_version_after_registrations() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = writer(&temp_dir).await?;

    let mut current = db
        .bootstrap_prompt("planner", DEFAULT_TASK_TYPE, "v1 text")
        .await?;
    for i in 2..=5 {
        current = db
            .register_prompt_version(&current, &format!("v{i} text"))
            .await?;
        assert_eq!(current.version, i);
    }

    let db_path = temp_dir.path().join("test.db");
    let reader = DatabaseReader::from_config(DatabaseConfig::new(db_path.to_string_lossy())).await?;
    let history = reader
        .get_prompt_history("planner", DEFAULT_TASK_TYPE)
        .await?;

    assert_eq!(history.len(), 5);
    assert_eq!(history.iter().filter(|p| p.is_active).count(), 1);
    assert!(history[0].is_active);
    assert_eq!(history[0].version, 5);

    // Versions strictly decrease in newest-first order
    let versions: Vec<i64> = history.iter().map(|p| p.version).collect();
    assert_eq!(versions, vec![5, 4, 3, 2, 1]);

    Ok(())
}

#[tokio::test]
async fn test_register_rejects_empty_replacement() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = writer(&temp_dir).await?;

    let v1 = db
        .bootstrap_prompt("planner", DEFAULT_TASK_TYPE, "v1 text")
        .await?;
    assert!(db.register_prompt_version(&v1, "  \n ").await.is_err());

    // Old version is still the active one
    let active = db.get_latest_prompt("planner", DEFAULT_TASK_TYPE).await?;
    assert_eq!(active.id, v1.id);

    Ok(())
}

#[tokio::test]
async fn test_score_updates_in_place() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = writer(&temp_dir).await?;

    db.bootstrap_prompt("planner", DEFAULT_TASK_TYPE, "v1 text")
        .await?;
    db.update_effectiveness_score("planner", DEFAULT_TASK_TYPE, 7.0)
        .await?;

    let active = db.get_latest_prompt("planner", DEFAULT_TASK_TYPE).await?;
    assert_eq!(active.version, 1);
    assert_eq!(active.effectiveness_score, Some(7.0));

    // Registering a new version resets the score on the new active row
    let v2 = db.register_prompt_version(&active, "v2 text").await?;
    assert!(v2.effectiveness_score.is_none());

    Ok(())
}

#[tokio::test]
async fn test_task_types_are_independent() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let db = writer(&temp_dir).await?;

    let default = db
        .bootstrap_prompt("planner", DEFAULT_TASK_TYPE, "default text")
        .await?;
    db.bootstrap_prompt("planner", "summarize", "summarize text")
        .await?;

    db.register_prompt_version(&default, "default v2").await?;

    let default_active = db.get_latest_prompt("planner", DEFAULT_TASK_TYPE).await?;
    let summarize_active = db.get_latest_prompt("planner", "summarize").await?;
    assert_eq!(default_active.version, 2);
    assert_eq!(summarize_active.version, 1);

    Ok(())
}
