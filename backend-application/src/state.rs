use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use backend_domain::ports::{Clock, KeyValueStore, Notifier, PriceSource};
use backend_domain::RuntimeConfig;
use tokio::sync::Mutex;

use crate::{Metrics, PlayerStore};

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub store: Arc<dyn KeyValueStore>,
    pub players: Arc<PlayerStore>,
    pub notifier: Arc<dyn Notifier>,
    pub price_source: Arc<dyn PriceSource>,
    pub clock: Arc<dyn Clock>,
    pub metrics: Arc<Metrics>,
    pub accrual_in_flight: Arc<AtomicBool>,
    /// Serializes gate checks so one player cannot be notified twice by overlapping runs.
    pub notify_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(
        config: RuntimeConfig,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        price_source: Arc<dyn PriceSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            players: Arc::new(PlayerStore::new(store.clone())),
            store,
            notifier,
            price_source,
            clock,
            metrics: Arc::new(Metrics::default()),
            accrual_in_flight: Arc::new(AtomicBool::new(false)),
            notify_lock: Arc::new(Mutex::new(())),
        }
    }
}
