//! Core database writer functionality
//!
//! Provides the main DatabaseWriter struct, connection setup, and idempotent
//! schema initialization.

use crate::{
    config::DatabaseConfig,
    error::{Result, StoreError},
};
use std::path::Path;
use tokio::fs;
use tracing::info;
use turso::{Builder, Connection};

/// Main database writer for the prompt store, agent registry, and run log
pub struct DatabaseWriter {
    pub conn: Connection,
    pub config: DatabaseConfig,
}

impl DatabaseWriter {
    /// Create a new database writer with the given configuration
    pub async fn new(config: DatabaseConfig) -> Result<Self> {
        info!(
            "[DB] Creating database connection to: {}",
            config.database_type()
        );

        // Ensure database directory exists
        if !config.is_memory() {
            if let Some(parent) = Path::new(&config.path).parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).await.map_err(|e| {
                        StoreError::connection_with_source(
                            format!("Failed to create database directory: {parent:?}"),
                            e,
                        )
                    })?;
                }
            }
        }

        let db = Builder::new_local(&config.path)
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

        let writer = Self { conn, config };

        // Initialize database schema
        writer.initialize_schema().await?;

        Ok(writer)
    }

    /// Initialize database schema with all necessary tables and indexes
    async fn initialize_schema(&self) -> Result<()> {
        info!("[DB] Initializing promind schema");

        let tables = [
            "CREATE TABLE IF NOT EXISTS agents (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                role TEXT NOT NULL,
                goal TEXT NOT NULL,
                model TEXT NOT NULL,
                optimize_prompt INTEGER NOT NULL DEFAULT 1,
                params TEXT NOT NULL,
                test_input TEXT,
                created_at TEXT NOT NULL
            )",
            "CREATE TABLE IF NOT EXISTS prompts (
                id TEXT PRIMARY KEY,
                agent_name TEXT NOT NULL,
                task_type TEXT NOT NULL DEFAULT 'default',
                version INTEGER NOT NULL,
                system_prompt TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                effectiveness_score REAL,
                prompt_md5 TEXT,
                created_at TEXT NOT NULL
            )",
            "CREATE TABLE IF NOT EXISTS agent_runs (
                id TEXT PRIMARY KEY,
                agent_name TEXT NOT NULL,
                input TEXT NOT NULL,
                output TEXT NOT NULL,
                prompt_version INTEGER NOT NULL,
                is_successful INTEGER NOT NULL,
                effectiveness_score REAL,
                extra TEXT,
                created_at TEXT NOT NULL
            )",
        ];

        for table in tables.iter() {
            self.conn
                .execute(table, ())
                .await
                .map_err(|_e| StoreError::schema("Failed to create table"))?;
        }

        let indexes = [
            "CREATE INDEX IF NOT EXISTS idx_agents_name ON agents(name)",
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_prompts_key_version ON prompts(agent_name, task_type, version)",
            "CREATE INDEX IF NOT EXISTS idx_prompts_active ON prompts(agent_name, task_type, is_active)",
            "CREATE INDEX IF NOT EXISTS idx_agent_runs_agent_created ON agent_runs(agent_name, created_at)",
        ];

        for index in indexes.iter() {
            self.conn
                .execute(index, ())
                .await
                .map_err(|_e| StoreError::schema("Failed to create index"))?;
        }

        info!("[DB] Promind schema initialized successfully");
        Ok(())
    }

    /// Get a reference to the database connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Get database configuration
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Get table row count
    pub async fn get_table_count(&self, table_name: &str) -> Result<i64> {
        let mut rows = self
            .conn
            .query(&format!("SELECT COUNT(*) FROM {table_name}"), ())
            .await
            .map_err(|e| StoreError::query("Failed to get table count", e))?;

        if let Some(row) = rows.next().await? {
            let count: i64 = row
                .get(0)
                .map_err(|e| StoreError::operation_with_source("Failed to parse table count", e))?;
            Ok(count)
        } else {
            Ok(0)
        }
    }
}
