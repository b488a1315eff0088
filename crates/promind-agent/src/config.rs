//! Completion endpoint configuration

use tracing::info;

/// Default OpenAI-compatible endpoint for a locally hosted model
pub const DEFAULT_API_URL: &str = "http://localhost:1234/v1";

/// Connection settings for the OpenAI-compatible completion endpoint
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the endpoint
    pub api_url: String,
    /// API key; empty for unauthenticated local servers
    pub api_key: String,
}

impl ProviderConfig {
    /// Load configuration from `LLM_API_URL` / `LLM_API_KEY` environment
    /// variables, falling back to the local default endpoint.
    pub fn from_env() -> Self {
        let api_url = match std::env::var("LLM_API_URL") {
            Ok(url) if !url.is_empty() => {
                info!("[LlmAgent] Using LLM_API_URL from environment.");
                url
            }
            _ => {
                info!("[LlmAgent] LLM_API_URL not set, using default: {DEFAULT_API_URL}");
                DEFAULT_API_URL.to_string()
            }
        };

        let api_key = match std::env::var("LLM_API_KEY") {
            Ok(key) if !key.is_empty() => {
                info!("[LlmAgent] Using LLM_API_KEY from environment.");
                key
            }
            _ => String::new(),
        };

        Self { api_url, api_key }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
        }
    }
}
