// Notification entities

use serde::{Deserialize, Serialize};

use crate::entities::PlayerRecord;
use crate::utils::group_thousands;

pub const FOCUS_FULL_TITLE: &str = "Focus Full!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPermission {
    Granted,
    Denied,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub title: String,
    pub body: String,
    /// Collapses repeated alerts for the same player on targets that support it.
    pub tag: String,
    pub player_id: Option<String>,
}

impl NotificationMessage {
    pub fn focus_full(player: &PlayerRecord) -> Self {
        Self {
            title: FOCUS_FULL_TITLE.to_string(),
            body: format!(
                "{} has reached {} focus!",
                player.nickname,
                group_thousands(u64::from(player.current_value))
            ),
            tag: format!("focus-full-{}", player.id),
            player_id: Some(player.id.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationDelivery {
    pub player_id: Option<String>,
    pub title: String,
    pub body: String,
    pub target: String,
    pub delivered_at: i64,
    pub ok: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationStatus {
    pub enabled: bool,
    pub permission: NotificationPermission,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationToggle {
    pub enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{PlayerId, Region};
    use chrono::Utc;

    #[test]
    fn focus_full_message_formats_value() {
        let player = PlayerRecord {
            id: PlayerId::from("player_7"),
            email: "a@b.co".to_string(),
            nickname: "Ironfoot".to_string(),
            region: Region::West,
            current_value: 30_000,
            last_update: Utc::now(),
        };
        let message = NotificationMessage::focus_full(&player);
        assert_eq!(message.title, "Focus Full!");
        assert_eq!(message.body, "Ironfoot has reached 30,000 focus!");
        assert_eq!(message.tag, "focus-full-player_7");
        assert_eq!(message.player_id.as_deref(), Some("player_7"));
    }
}
