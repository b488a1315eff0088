//! # promind-orchestrator
//!
//! The prompt optimization loop for promind agents.
//!
//! This crate orchestrates the run → score → rewrite → persist → notify cycle:
//! the controller pulls the active prompt, executes the target agent, scores
//! the output through a designated evaluator agent, and — below the passing
//! threshold — asks a designated optimizer agent for a replacement prompt,
//! registers it as a new version, and reports the change.

pub mod config;
pub mod controller;
pub mod gateway;
pub mod heuristics;
pub mod notifier;
pub mod rewriter;
pub mod scorer;
pub mod templates;

pub use config::OptimizerConfig;
pub use controller::OptimizationController;
pub use gateway::{ChatGateway, ParsedCommand};
pub use notifier::{Notifier, NullNotifier, WebhookNotifier};
pub use rewriter::PromptRewriter;
pub use scorer::EffectivenessScorer;
pub use templates::PromptTemplates;

/// Result type for orchestrator operations
pub type Result<T> = anyhow::Result<T>;

/// Re-export common types for convenience
pub use promind_types::{HaltReason, OptimizationEvent, OptimizationOutcome};
