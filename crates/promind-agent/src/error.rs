//! Agent error taxonomy
//!
//! Generation failures are recoverable from the controller's point of view
//! (worst-case score, loop continues); configuration failures are not.

use thiserror::Error;

/// Errors from agent construction or execution
#[derive(Error, Debug)]
pub enum AgentError {
    /// The completion call failed (timeout, transport, model error)
    #[error("Generation failed for agent '{agent_name}': {message}")]
    Generation {
        agent_name: String,
        message: String,
    },

    /// The agent or its prompt could not be resolved into a runnable state
    #[error("Agent configuration error: {message}")]
    Configuration { message: String },
}

impl AgentError {
    /// Create a generation error
    pub fn generation<A: Into<String>, M: Into<String>>(agent_name: A, message: M) -> Self {
        Self::Generation {
            agent_name: agent_name.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<M: Into<String>>(message: M) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
