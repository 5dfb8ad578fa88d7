use std::env;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::{CapPolicy, RuntimeConfig, DEFAULT_DAILY_GAIN, DEFAULT_PRICE_LOCATIONS};

use super::validation::{normalize_list, parse_env_list, validate_http_url};

pub const CONFIG_PATH_ENV: &str = "FOCUS_CONFIG";
const ENV_PREFIX: &str = "FOCUS_";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    /// Empty keeps everything in memory.
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

impl Default for AppConfig {
    fn default() -> Self {
        let runtime = RuntimeConfig::default();
        Self {
            bind_addr: runtime.bind_addr,
            api_token: None,
            data_path: runtime.data_path,
            daily_gain: DEFAULT_DAILY_GAIN,
            accrual_interval_seconds: runtime.accrual_interval_seconds,
            cap_policy: CapPolicy::default(),
            notification_cooldown_hours: runtime.notification_cooldown_hours,
            notification_webhook_url: None,
            notification_webhook_template: None,
            price_api_base_url: runtime.price_api_base_url,
            price_locations: DEFAULT_PRICE_LOCATIONS.iter().map(ToString::to_string).collect(),
            price_qualities: runtime.price_qualities,
            request_timeout_seconds: runtime.request_timeout_seconds,
            max_body_bytes: runtime.max_body_bytes,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "./config.toml".to_string());
        Self::load_from(Path::new(&path), |key| env::var(key).ok()).await
    }

    pub async fn load_from(
        file_path: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            toml::from_str::<AppConfig>(&content)
                .map_err(|err| anyhow!("invalid config {}: {}", file_path.display(), err))?
        } else {
            warn!(path = %file_path.display(), "config file not found, using defaults");
            AppConfig::default()
        };
        config.apply_overrides(lookup)?;
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        self.api_token = non_blank(self.api_token.take());
        self.notification_webhook_url = non_blank(self.notification_webhook_url.take());
        self.notification_webhook_template = non_blank(self.notification_webhook_template.take());
        self.data_path = self.data_path.trim().to_string();
        self.price_api_base_url = self.price_api_base_url.trim().trim_end_matches('/').to_string();
        self.price_locations = normalize_list(std::mem::take(&mut self.price_locations));
        self.price_qualities.sort_unstable();
        self.price_qualities.dedup();
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.data_path = resolve_path(base, &self.data_path);
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if !(self.daily_gain.is_finite() && self.daily_gain > 0.0) {
            return Err(anyhow!("daily_gain must be greater than 0"));
        }
        if self.accrual_interval_seconds == 0 {
            return Err(anyhow!("accrual_interval_seconds must be greater than 0"));
        }
        if self.notification_cooldown_hours == 0 {
            return Err(anyhow!("notification_cooldown_hours must be greater than 0"));
        }
        if let Some(url) = &self.notification_webhook_url {
            validate_http_url("notification_webhook_url", url)?;
        }
        validate_http_url("price_api_base_url", &self.price_api_base_url)?;
        if self.price_locations.is_empty() {
            return Err(anyhow!("price_locations must not be empty"));
        }
        if self.price_qualities.is_empty() || self.price_qualities.iter().any(|q| *q > 5) {
            return Err(anyhow!("price_qualities must list values between 0 and 5"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            data_path: self.data_path.clone(),
            daily_gain: self.daily_gain,
            accrual_interval_seconds: self.accrual_interval_seconds,
            cap_policy: self.cap_policy,
            notification_cooldown_hours: self.notification_cooldown_hours,
            notification_webhook_url: self.notification_webhook_url.clone(),
            notification_webhook_template: self.notification_webhook_template.clone(),
            price_api_base_url: self.price_api_base_url.clone(),
            price_locations: self.price_locations.clone(),
            price_qualities: self.price_qualities.clone(),
            request_timeout_seconds: self.request_timeout_seconds,
            max_body_bytes: self.max_body_bytes,
        }
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(value) = var("BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Some(value) = var("API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Some(value) = var("DATA_PATH") {
            self.data_path = value;
        }
        if let Some(value) = var("DAILY_GAIN") {
            self.daily_gain = value.parse().unwrap_or(self.daily_gain);
        }
        if let Some(value) = var("ACCRUAL_INTERVAL_SECONDS") {
            self.accrual_interval_seconds = value.parse().unwrap_or(self.accrual_interval_seconds);
        }
        if let Some(value) = var("CAP_POLICY") {
            self.cap_policy = CapPolicy::from_str(&value)?;
        }
        if let Some(value) = var("NOTIFICATION_COOLDOWN_HOURS") {
            self.notification_cooldown_hours =
                value.parse().unwrap_or(self.notification_cooldown_hours);
        }
        if let Some(value) = var("NOTIFICATION_WEBHOOK_URL") {
            self.notification_webhook_url = Some(value);
        }
        if let Some(value) = var("NOTIFICATION_WEBHOOK_TEMPLATE") {
            self.notification_webhook_template = Some(value);
        }
        if let Some(value) = var("PRICE_API_BASE_URL") {
            self.price_api_base_url = value;
        }
        if let Some(value) = var("PRICE_LOCATIONS") {
            self.price_locations = parse_env_list(&value);
        }
        if let Some(value) = var("PRICE_QUALITIES") {
            self.price_qualities = parse_env_list(&value)
                .iter()
                .filter_map(|item| item.parse().ok())
                .collect();
        }
        if let Some(value) = var("REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Some(value) = var("MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml"), no_env)
            .await
            .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3240");
        assert_eq!(config.cap_policy, CapPolicy::LeaveStale);
        assert_eq!(config.price_locations.len(), 5);
        assert!(config.data_path.starts_with(&dir.path().to_string_lossy().to_string()));
    }

    #[tokio::test]
    async fn file_values_and_env_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
bind_addr = "0.0.0.0:8080"
api_token = "  "
data_path = "state/players.json"
daily_gain = 2400.0
cap_policy = "clamp_and_commit"
price_locations = ["martlock", " martlock", "thetford"]
price_api_base_url = "https://example.com/prices/"
"#,
        )
        .unwrap();

        let env: HashMap<&str, &str> = [
            ("FOCUS_ACCRUAL_INTERVAL_SECONDS", "60"),
            ("FOCUS_PRICE_QUALITIES", "2, 1, 2"),
        ]
        .into_iter()
        .collect();
        let config = AppConfig::load_from(&path, |key| env.get(key).map(|v| v.to_string()))
            .await
            .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.api_token, None);
        assert_eq!(config.daily_gain, 2400.0);
        assert_eq!(config.cap_policy, CapPolicy::ClampAndCommit);
        assert_eq!(config.accrual_interval_seconds, 60);
        assert_eq!(config.price_locations, vec!["martlock", "thetford"]);
        assert_eq!(config.price_qualities, vec![1, 2]);
        assert_eq!(config.price_api_base_url, "https://example.com/prices");
        assert_eq!(
            Path::new(&config.data_path),
            dir.path().join("state/players.json")
        );

        let runtime = config.to_runtime_config();
        assert_eq!(runtime.notification_cooldown().num_hours(), 24);
    }

    #[tokio::test]
    async fn rejects_unknown_cap_policy_override() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from(&dir.path().join("absent.toml"), |key| {
            (key == "FOCUS_CAP_POLICY").then(|| "sometimes".to_string())
        })
        .await;
        assert!(result.is_err());
    }

    #[test]
    fn validate_catches_bad_values() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.daily_gain = 0.0;
        assert!(config.validate().is_err());
        config.daily_gain = DEFAULT_DAILY_GAIN;

        config.bind_addr = "not an addr".to_string();
        assert!(config.validate().is_err());
        config.bind_addr = "127.0.0.1:3240".to_string();

        config.notification_webhook_url = Some("mailto:ops@example.com".to_string());
        assert!(config.validate().is_err());
        config.notification_webhook_url = None;

        config.price_qualities = vec![9];
        assert!(config.validate().is_err());
    }
}
