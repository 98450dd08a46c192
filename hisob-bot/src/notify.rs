//! Outbound notification boundary for budget alerts.

use anyhow::{Context, Result};
use async_trait::async_trait;
use hisob_core::UserId;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, user_id: UserId, text: &str) -> Result<()>;
}

/// Prints alerts to stdout. Used by the interactive REPL.
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, user_id: UserId, text: &str) -> Result<()> {
        println!("🔔 [{user_id}] {text}");
        Ok(())
    }
}

/// POSTs alerts as JSON to a configured endpoint.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, user_id: UserId, text: &str) -> Result<()> {
        self.client
            .post(&self.url)
            .json(&serde_json::json!({ "user_id": user_id, "text": text }))
            .send()
            .await
            .context("send notification webhook")?
            .error_for_status()
            .context("notification webhook status")?;
        Ok(())
    }
}

/// Alerts must never fail the message pipeline; delivery errors are
/// logged and dropped.
pub async fn notify_best_effort(notifier: &dyn Notifier, user_id: UserId, text: &str) {
    if let Err(err) = notifier.notify(user_id, text).await {
        tracing::warn!(user_id, %err, "notification delivery failed");
    }
}
