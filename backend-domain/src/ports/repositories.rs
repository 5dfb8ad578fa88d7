use async_trait::async_trait;
use serde_json::Value;

pub const PLAYERS_KEY: &str = "albion_players";
pub const NOTIFICATION_ENABLED_KEY: &str = "albion_notification_enabled";
pub const NOTIFIED_KEY_PREFIX: &str = "notified_";

pub fn notified_key(player_id: &str) -> String {
    format!("{}{}", NOTIFIED_KEY_PREFIX, player_id)
}

/// Opaque string-keyed JSON storage. Writers replace the whole value for a key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> anyhow::Result<()>;
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
    async fn ping(&self) -> anyhow::Result<()>;
}
