use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use backend_application::AppState;
use backend_domain::ports::{KeyValueStore, Notifier};
use backend_domain::RuntimeConfig;
use backend_infrastructure::{
    build_notifier, AppConfig, HttpPriceSource, JsonFileStore, MemoryStore, SystemClock,
};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        Self::from_config(config.to_runtime_config()).await
    }

    pub async fn from_config(runtime_config: RuntimeConfig) -> Result<Self> {
        let store = build_store(&runtime_config);
        store.ping().await?;

        let notifier: Arc<dyn Notifier> = Arc::from(build_notifier(&runtime_config)?);
        let price_source = Arc::new(HttpPriceSource::new(&runtime_config)?);

        info!(
            cap_policy = ?runtime_config.cap_policy,
            daily_gain = runtime_config.daily_gain,
            "focus tracker configured"
        );

        let state = AppState::new(
            runtime_config,
            store,
            notifier,
            price_source,
            Arc::new(SystemClock),
        );
        Ok(Self { state })
    }
}

fn build_store(config: &RuntimeConfig) -> Arc<dyn KeyValueStore> {
    if config.data_path.is_empty() {
        warn!("data_path is empty, players are kept in memory only");
        Arc::new(MemoryStore::new())
    } else {
        let store = JsonFileStore::new(&config.data_path);
        info!(path = %store.path().display(), "using json file store");
        Arc::new(store)
    }
}
