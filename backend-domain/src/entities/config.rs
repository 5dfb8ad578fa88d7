// Runtime configuration shared by every layer

use chrono::Duration;

use crate::entities::DEFAULT_DAILY_GAIN;
use crate::services::DEFAULT_NOTIFICATION_COOLDOWN_HOURS;
use crate::value_objects::CapPolicy;

pub const DEFAULT_PRICE_LOCATIONS: [&str; 5] =
    ["fortsterling", "martlock", "thetford", "lymhurst", "bridgewatch"];

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub data_path: String,
    pub daily_gain: f64,
    pub accrual_interval_seconds: u64,
    pub cap_policy: CapPolicy,
    pub notification_cooldown_hours: u64,
    pub notification_webhook_url: Option<String>,
    pub notification_webhook_template: Option<String>,
    pub price_api_base_url: String,
    pub price_locations: Vec<String>,
    pub price_qualities: Vec<u8>,
    pub request_timeout_seconds: u64,
    pub max_body_bytes: u64,
}

impl RuntimeConfig {
    pub fn notification_cooldown(&self) -> Duration {
        let hours = i64::try_from(self.notification_cooldown_hours).unwrap_or(i64::MAX);
        Duration::try_hours(hours).unwrap_or(Duration::MAX)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3240".to_string(),
            api_token: None,
            data_path: "./data/focus_store.json".to_string(),
            daily_gain: DEFAULT_DAILY_GAIN,
            accrual_interval_seconds: 3600,
            cap_policy: CapPolicy::default(),
            notification_cooldown_hours: DEFAULT_NOTIFICATION_COOLDOWN_HOURS,
            notification_webhook_url: None,
            notification_webhook_template: None,
            price_api_base_url: "https://www.albion-online-data.com/api/v2/stats/Prices".to_string(),
            price_locations: DEFAULT_PRICE_LOCATIONS.iter().map(ToString::to_string).collect(),
            price_qualities: vec![1],
            request_timeout_seconds: 15,
            max_body_bytes: 1024 * 1024,
        }
    }
}
