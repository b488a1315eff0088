//! Shared stubs for orchestrator tests
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc, Mutex,
};

use promind_agent::{AgentBinder, AgentError, AgentRuntime};
use promind_db::{DatabaseConfig, DatabaseWriter};
use promind_types::{AgentDefinition, AgentRole};

/// Runtime that always returns the same canned reply (or error)
pub struct FixedRuntime {
    pub name: String,
    pub reply: Result<String, String>,
    pub calls: Arc<AtomicU32>,
}

impl FixedRuntime {
    pub fn ok(name: &str, reply: &str) -> (Self, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        (
            Self {
                name: name.to_string(),
                reply: Ok(reply.to_string()),
                calls: calls.clone(),
            },
            calls,
        )
    }

    pub fn failing(name: &str, message: &str) -> (Self, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        (
            Self {
                name: name.to_string(),
                reply: Err(message.to_string()),
                calls: calls.clone(),
            },
            calls,
        )
    }
}

#[async_trait]
impl AgentRuntime for FixedRuntime {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        "stub-model"
    }

    async fn run(&self, _input: &str) -> Result<String, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .map_err(|e| AgentError::generation(&self.name, e))
    }
}

/// Runtime that replays a scripted sequence of replies, then repeats the last
pub struct SequencedRuntime {
    pub name: String,
    replies: Mutex<VecDeque<String>>,
    last: String,
    pub calls: Arc<AtomicU32>,
}

impl SequencedRuntime {
    pub fn new(name: &str, replies: &[&str]) -> (Self, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        let last = replies.last().expect("at least one reply").to_string();
        (
            Self {
                name: name.to_string(),
                replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
                last,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

#[async_trait]
impl AgentRuntime for SequencedRuntime {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        "stub-model"
    }

    async fn run(&self, _input: &str) -> Result<String, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut replies = self.replies.lock().unwrap();
        Ok(replies.pop_front().unwrap_or_else(|| self.last.clone()))
    }
}

/// Binder handing out fixed-output runtimes for the target agent
pub struct StubBinder {
    pub output: Result<String, String>,
    pub generations: Arc<AtomicU32>,
}

impl StubBinder {
    pub fn ok(output: &str) -> (Arc<Self>, Arc<AtomicU32>) {
        let generations = Arc::new(AtomicU32::new(0));
        (
            Arc::new(Self {
                output: Ok(output.to_string()),
                generations: generations.clone(),
            }),
            generations,
        )
    }

    pub fn failing(message: &str) -> (Arc<Self>, Arc<AtomicU32>) {
        let generations = Arc::new(AtomicU32::new(0));
        (
            Arc::new(Self {
                output: Err(message.to_string()),
                generations: generations.clone(),
            }),
            generations,
        )
    }
}

#[async_trait]
impl AgentBinder for StubBinder {
    async fn bind(
        &self,
        definition: &AgentDefinition,
        _system_prompt: &str,
    ) -> Result<Box<dyn AgentRuntime>, AgentError> {
        Ok(Box::new(FixedRuntime {
            name: definition.name.clone(),
            reply: self.output.clone(),
            calls: self.generations.clone(),
        }))
    }
}

/// Fresh on-disk database for one test
pub async fn test_store(
    temp_dir: &tempfile::TempDir,
) -> Result<Arc<DatabaseWriter>, Box<dyn std::error::Error>> {
    let db_path = temp_dir.path().join("test.db");
    let config = DatabaseConfig::new(db_path.to_string_lossy());
    Ok(Arc::new(DatabaseWriter::new(config).await?))
}

/// A target agent registered with a bootstrap prompt
pub async fn seeded_agent(
    store: &DatabaseWriter,
    name: &str,
    optimize_prompt: bool,
) -> Result<AgentDefinition, Box<dyn std::error::Error>> {
    let agent = AgentDefinition::new(name, AgentRole::Planner, "plan projects", "stub-model")
        .with_optimize_prompt(optimize_prompt)
        .with_test_input("plan a book rental app");
    store.upsert_agent(&agent).await?;
    store
        .bootstrap_prompt(name, "default", "You are a planner. Break work into tasks.")
        .await?;
    Ok(agent)
}
