use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{info, warn};

use backend_domain::ports::Notifier;
use backend_domain::{
    current_millis, NotificationDelivery, NotificationMessage, NotificationPermission,
    RuntimeConfig,
};

const MAX_DELIVERY_HISTORY: usize = 200;
const DEFAULT_TEMPLATE: &str = r#"{"title":"{title}","body":"{body}","tag":"{tag}"}"#;

/// Bounded, newest-first record of dispatch attempts.
#[derive(Default)]
pub struct DeliveryLog {
    entries: Mutex<VecDeque<NotificationDelivery>>,
}

impl DeliveryLog {
    pub async fn record(&self, message: &NotificationMessage, target: &str, outcome: &Result<()>) {
        let delivery = NotificationDelivery {
            player_id: message.player_id.clone(),
            title: message.title.clone(),
            body: message.body.clone(),
            target: target.to_string(),
            delivered_at: current_millis(),
            ok: outcome.is_ok(),
            error: outcome.as_ref().err().map(|err| format!("{:#}", err)),
        };
        let mut entries = self.entries.lock().await;
        entries.push_front(delivery);
        entries.truncate(MAX_DELIVERY_HISTORY);
    }

    pub async fn list(&self, limit: usize) -> Vec<NotificationDelivery> {
        self.entries.lock().await.iter().take(limit).cloned().collect()
    }

    pub async fn last(&self) -> Option<NotificationDelivery> {
        self.entries.lock().await.front().cloned()
    }
}

/// Posts each alert as JSON to a configured URL. Configuring the URL is the permission grant.
pub struct WebhookNotifier {
    client: Client,
    url: String,
    template: String,
    log: DeliveryLog,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, template: Option<String>, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds.max(3)))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
            template: template.unwrap_or_else(|| DEFAULT_TEMPLATE.to_string()),
            log: DeliveryLog::default(),
        })
    }

    async fn post(&self, message: &NotificationMessage) -> Result<()> {
        let payload = build_payload(&self.template, message);
        self.client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn permission(&self) -> NotificationPermission {
        NotificationPermission::Granted
    }

    async fn request_permission(&self) -> NotificationPermission {
        NotificationPermission::Granted
    }

    async fn dispatch(&self, message: &NotificationMessage) -> Result<()> {
        let outcome = self.post(message).await;
        self.log.record(message, &self.url, &outcome).await;
        outcome
    }

    async fn check_target(&self) -> Result<()> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("notification webhook responded {}", response.status());
        }
        Ok(())
    }

    async fn list_deliveries(&self, limit: usize) -> Vec<NotificationDelivery> {
        self.log.list(limit).await
    }

    async fn last_delivery(&self) -> Option<NotificationDelivery> {
        self.log.last().await
    }
}

/// Writes alerts to the service log. Used when no webhook is configured.
#[derive(Default)]
pub struct LogNotifier {
    log: DeliveryLog,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    fn permission(&self) -> NotificationPermission {
        NotificationPermission::Granted
    }

    async fn request_permission(&self) -> NotificationPermission {
        NotificationPermission::Granted
    }

    async fn dispatch(&self, message: &NotificationMessage) -> Result<()> {
        info!(
            title = %message.title,
            tag = %message.tag,
            "{}",
            message.body
        );
        let outcome = Ok(());
        self.log.record(message, "log", &outcome).await;
        outcome
    }

    async fn check_target(&self) -> Result<()> {
        Ok(())
    }

    async fn list_deliveries(&self, limit: usize) -> Vec<NotificationDelivery> {
        self.log.list(limit).await
    }

    async fn last_delivery(&self) -> Option<NotificationDelivery> {
        self.log.last().await
    }
}

pub fn build_notifier(config: &RuntimeConfig) -> Result<Box<dyn Notifier>> {
    match &config.notification_webhook_url {
        Some(url) => Ok(Box::new(WebhookNotifier::new(
            url.clone(),
            config.notification_webhook_template.clone(),
            config.request_timeout_seconds,
        )?)),
        None => {
            warn!("notification_webhook_url not set, alerts go to the log only");
            Ok(Box::new(LogNotifier::new()))
        }
    }
}

/// Fills `{title}`, `{body}`, `{tag}` and `{player_id}` with JSON-escaped text.
pub fn build_payload(template: &str, message: &NotificationMessage) -> String {
    template
        .replace("{title}", &json_escape(&message.title))
        .replace("{body}", &json_escape(&message.body))
        .replace("{tag}", &json_escape(&message.tag))
        .replace(
            "{player_id}",
            &json_escape(message.player_id.as_deref().unwrap_or_default()),
        )
}

fn json_escape(value: &str) -> String {
    let quoted = serde_json::Value::String(value.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn message(body: &str) -> NotificationMessage {
        NotificationMessage {
            title: "Focus Full!".to_string(),
            body: body.to_string(),
            tag: "focus-full-p1".to_string(),
            player_id: Some("p1".to_string()),
        }
    }

    #[test]
    fn default_payload_is_valid_json_even_with_quotes() {
        let payload = build_payload(DEFAULT_TEMPLATE, &message(r#"Big "Al" has reached 30,000 focus!"#));
        let value: Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["title"], "Focus Full!");
        assert_eq!(value["body"], r#"Big "Al" has reached 30,000 focus!"#);
        assert_eq!(value["tag"], "focus-full-p1");
    }

    #[test]
    fn custom_template_placeholders() {
        let payload = build_payload(r#"{"text":"{title}: {body}","who":"{player_id}"}"#, &message("done"));
        let value: Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["text"], "Focus Full!: done");
        assert_eq!(value["who"], "p1");
    }

    #[tokio::test]
    async fn log_notifier_keeps_newest_first() {
        let notifier = LogNotifier::new();
        notifier.dispatch(&message("first")).await.unwrap();
        notifier.dispatch(&message("second")).await.unwrap();
        let deliveries = notifier.list_deliveries(10).await;
        assert_eq!(deliveries.len(), 2);
        assert_eq!(deliveries[0].body, "second");
        assert!(deliveries.iter().all(|d| d.ok && d.target == "log"));
        assert_eq!(notifier.last_delivery().await.unwrap().body, "second");
    }

    #[tokio::test]
    async fn history_is_bounded() {
        let log = DeliveryLog::default();
        for idx in 0..(MAX_DELIVERY_HISTORY + 5) {
            log.record(&message(&idx.to_string()), "log", &Ok(())).await;
        }
        let all = log.list(usize::MAX).await;
        assert_eq!(all.len(), MAX_DELIVERY_HISTORY);
        assert_eq!(all[0].body, (MAX_DELIVERY_HISTORY + 4).to_string());
    }

    #[tokio::test]
    async fn unreachable_webhook_records_failure() {
        let notifier = WebhookNotifier::new("http://127.0.0.1:9/hook", None, 3).unwrap();
        assert!(notifier.dispatch(&message("x")).await.is_err());
        let last = notifier.last_delivery().await.unwrap();
        assert!(!last.ok);
        assert!(last.error.is_some());
        assert_eq!(last.target, "http://127.0.0.1:9/hook");
    }

    #[test]
    fn builds_log_notifier_without_url() {
        let notifier = build_notifier(&RuntimeConfig::default()).unwrap();
        assert_eq!(notifier.permission(), NotificationPermission::Granted);
    }
}
