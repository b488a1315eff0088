//! Optimization event notifier
//!
//! Best-effort delivery of human-readable summaries to an external channel.
//! Delivery failures are logged and swallowed: the new prompt version is
//! already durably persisted before notification, so nothing downstream may
//! depend on the message arriving.

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use promind_types::OptimizationEvent;

/// Fire-and-forget event sink
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one event summary. Must never propagate failure.
    async fn notify(&self, event: &OptimizationEvent);
}

/// Posts event summaries as text to a webhook endpoint
pub struct WebhookNotifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl WebhookNotifier {
    /// Create a notifier; a `None` URL downgrades every delivery to a logged skip
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url,
        }
    }

    /// Render the human-readable summary for one event
    pub fn format_event(event: &OptimizationEvent) -> String {
        let score_old = event
            .score_old
            .map(|s| s.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let score_new = event
            .score_new
            .map(|s| s.to_string())
            .unwrap_or_else(|| "N/A".to_string());

        format!(
            "Prompt optimized for agent: `{}`\n\
             Model used: `{}`\n\
             Score: `{}` -> `{}`\n\
             Version: `v{}` -> `v{}`\n\n\
             Original prompt:\n```text\n{}\n```\n\n\
             Improved prompt:\n```text\n{}\n```",
            event.agent_name,
            event.model,
            score_old,
            score_new,
            event.version_old,
            event.version_new,
            event.original.trim(),
            event.improved.trim(),
        )
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, event: &OptimizationEvent) {
        let Some(url) = &self.webhook_url else {
            warn!("[Notifier] Webhook URL not set, skipping notification");
            return;
        };

        let message = Self::format_event(event);
        let result = self
            .client
            .post(url)
            .json(&json!({ "text": message }))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                info!(
                    "[Notifier] Notification sent for agent '{}'",
                    event.agent_name
                );
            }
            Ok(response) => {
                warn!(
                    "[Notifier] Webhook rejected notification for '{}': {}",
                    event.agent_name,
                    response.status()
                );
            }
            Err(e) => {
                warn!(
                    "[Notifier] Failed to send notification for '{}': {e}",
                    event.agent_name
                );
            }
        }
    }
}

/// Notifier that discards events, for tests and notification-less deployments
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn notify(&self, event: &OptimizationEvent) {
        info!(
            "[Notifier] (null) prompt v{} -> v{} for agent '{}'",
            event.version_old, event.version_new, event.agent_name
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn sample_event() -> OptimizationEvent {
        OptimizationEvent {
            agent_name: "planner".to_string(),
            prompt_id: Uuid::new_v4(),
            version_old: 2,
            version_new: 3,
            score_old: Some(4.0),
            score_new: Some(3.0),
            model: "qwen2.5-7b".to_string(),
            original: "You plan.".to_string(),
            improved: "You plan, step by step.".to_string(),
        }
    }

    #[test]
    fn test_format_includes_versions_and_prompts() {
        let text = WebhookNotifier::format_event(&sample_event());
        assert!(text.contains("`planner`"));
        assert!(text.contains("`v2` -> `v3`"));
        assert!(text.contains("You plan."));
        assert!(text.contains("You plan, step by step."));
    }

    #[test]
    fn test_format_handles_missing_scores() {
        let mut event = sample_event();
        event.score_old = None;
        let text = WebhookNotifier::format_event(&event);
        assert!(text.contains("`N/A` -> `3`"));
    }

    #[tokio::test]
    async fn test_unset_webhook_never_fails() {
        // notify() has no error channel at all; this asserts it also does not panic
        WebhookNotifier::new(None).notify(&sample_event()).await;
    }

    #[tokio::test]
    async fn test_unreachable_webhook_never_fails() {
        let notifier = WebhookNotifier::new(Some("http://127.0.0.1:1/unreachable".to_string()));
        notifier.notify(&sample_event()).await;
    }
}
