// Player entity
// A tracked character and its last known focus

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::value_objects::{PlayerId, Region};

pub const MAX_FOCUS: u32 = 30_000;
pub const DEFAULT_DAILY_GAIN: f64 = 10_000.0;
pub const NICKNAME_MIN_CHARS: usize = 3;
pub const NICKNAME_MAX_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub email: String,
    pub nickname: String,
    pub region: Region,
    #[serde(alias = "focusRightNow")]
    pub current_value: u32,
    #[serde(alias = "createdAt")]
    pub last_update: DateTime<Utc>,
}

impl PlayerRecord {
    pub fn new(id: PlayerId, input: PlayerInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            email: input.email,
            nickname: input.nickname,
            region: input.region,
            current_value: input.current_value,
            last_update: now,
        }
    }

    pub fn is_full(&self) -> bool {
        self.current_value >= MAX_FOCUS
    }

    /// Applies a validated patch. A new focus value restarts accrual from `now`.
    pub fn apply(&mut self, patch: PlayerPatch, now: DateTime<Utc>) {
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(nickname) = patch.nickname {
            self.nickname = nickname;
        }
        if let Some(region) = patch.region {
            self.region = region;
        }
        if let Some(value) = patch.current_value {
            if value != self.current_value {
                self.current_value = value;
                self.last_update = now;
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInput {
    pub email: String,
    pub nickname: String,
    pub region: Region,
    #[serde(alias = "focusRightNow")]
    pub current_value: u32,
}

impl PlayerInput {
    pub fn normalized(self) -> Self {
        Self {
            email: self.email.trim().to_string(),
            nickname: self.nickname.trim().to_string(),
            region: self.region,
            current_value: self.current_value,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)?;
        validate_nickname(&self.nickname)?;
        validate_focus(self.current_value)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPatch {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub region: Option<Region>,
    #[serde(default, alias = "focusRightNow")]
    pub current_value: Option<u32>,
}

impl PlayerPatch {
    pub fn normalized(self) -> Self {
        Self {
            email: self.email.map(|value| value.trim().to_string()),
            nickname: self.nickname.map(|value| value.trim().to_string()),
            region: self.region,
            current_value: self.current_value,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(nickname) = &self.nickname {
            validate_nickname(nickname)?;
        }
        if let Some(value) = self.current_value {
            validate_focus(value)?;
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    let domain_ok = domain
        .split_once('.')
        .map(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
        .unwrap_or(false);
    if local.is_empty() || !domain_ok || domain.contains('@') || email.contains(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

fn validate_nickname(nickname: &str) -> Result<(), ValidationError> {
    let len = nickname.chars().count();
    if !(NICKNAME_MIN_CHARS..=NICKNAME_MAX_CHARS).contains(&len) {
        return Err(ValidationError::NicknameLength {
            min: NICKNAME_MIN_CHARS,
            max: NICKNAME_MAX_CHARS,
        });
    }
    Ok(())
}

fn validate_focus(value: u32) -> Result<(), ValidationError> {
    if value > MAX_FOCUS {
        return Err(ValidationError::FocusOutOfRange { max: MAX_FOCUS });
    }
    Ok(())
}
