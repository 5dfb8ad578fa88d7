// Identifier value objects

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const PLAYER_ID_PREFIX: &str = "player";
const PLAYER_ID_SUFFIX_LEN: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// `player_<epoch millis>_<9 random chars>`, the same shape older exports carry.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let random = uuid::Uuid::new_v4().simple().to_string();
        Self(format!(
            "{}_{}_{}",
            PLAYER_ID_PREFIX,
            now.timestamp_millis(),
            &random[..PLAYER_ID_SUFFIX_LEN]
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
