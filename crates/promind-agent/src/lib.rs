//! # promind-agent
//!
//! LLM agent runtime for the promind workspace. Binds an [`promind_types::AgentDefinition`]
//! and its active system prompt to a live completion model behind an
//! OpenAI-compatible endpoint, exposing only the narrow "run input, get text"
//! capability the orchestrator depends on.

pub mod config;
pub mod error;
pub mod factory;
pub mod runtime;

pub use config::ProviderConfig;
pub use error::AgentError;
pub use factory::{AgentBinder, AgentFactory};
pub use runtime::{AgentRuntime, LlmAgent};
