// In-memory fakes for the domain ports

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use backend_domain::ports::{Clock, KeyValueStore, Notifier, PriceSource};
use backend_domain::{
    NotificationDelivery, NotificationMessage, NotificationPermission, PlayerId, PlayerRecord,
    PriceRecord, Region, RuntimeConfig,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::AppState;

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap()
}

pub fn sample_player(id: &str, current_value: u32) -> PlayerRecord {
    PlayerRecord {
        id: PlayerId::from(id),
        email: format!("{id}@example.com"),
        nickname: format!("nick_{id}"),
        region: Region::Europe,
        current_value,
        last_update: epoch(),
    }
}

#[derive(Default)]
pub struct MemoryKv {
    values: Mutex<HashMap<String, Value>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryKv {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for MemoryKv {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Value>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("disk full");
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.values.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

pub struct RecordingNotifier {
    pub permission: Mutex<NotificationPermission>,
    pub grant_on_request: bool,
    pub fail_dispatch: bool,
    pub sent: Mutex<Vec<NotificationMessage>>,
}

impl RecordingNotifier {
    pub fn granted() -> Self {
        Self {
            permission: Mutex::new(NotificationPermission::Granted),
            grant_on_request: true,
            fail_dispatch: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn denying() -> Self {
        Self {
            permission: Mutex::new(NotificationPermission::Default),
            grant_on_request: false,
            fail_dispatch: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<NotificationMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn permission(&self) -> NotificationPermission {
        *self.permission.lock().unwrap()
    }

    async fn request_permission(&self) -> NotificationPermission {
        let next = if self.grant_on_request {
            NotificationPermission::Granted
        } else {
            NotificationPermission::Denied
        };
        *self.permission.lock().unwrap() = next;
        next
    }

    async fn dispatch(&self, message: &NotificationMessage) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(message.clone());
        if self.fail_dispatch {
            anyhow::bail!("target unreachable");
        }
        Ok(())
    }

    async fn check_target(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn list_deliveries(&self, limit: usize) -> Vec<NotificationDelivery> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .take(limit)
            .map(|message| NotificationDelivery {
                player_id: message.player_id.clone(),
                title: message.title.clone(),
                body: message.body.clone(),
                target: "memory".to_string(),
                delivered_at: 0,
                ok: !self.fail_dispatch,
                error: None,
            })
            .collect()
    }

    async fn last_delivery(&self) -> Option<NotificationDelivery> {
        self.list_deliveries(1).await.into_iter().next()
    }
}

#[derive(Default)]
pub struct StaticPrices {
    pub records: Option<Vec<PriceRecord>>,
    pub requested: Mutex<Vec<(Vec<String>, Vec<String>, Vec<u8>)>>,
}

#[async_trait]
impl PriceSource for StaticPrices {
    async fn fetch_prices(
        &self,
        item_ids: &[String],
        locations: &[String],
        qualities: &[u8],
    ) -> Option<Vec<PriceRecord>> {
        self.requested
            .lock()
            .unwrap()
            .push((item_ids.to_vec(), locations.to_vec(), qualities.to_vec()));
        self.records.clone()
    }
}

pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub struct Harness {
    pub state: AppState,
    pub kv: Arc<MemoryKv>,
    pub notifier: Arc<RecordingNotifier>,
    pub prices: Arc<StaticPrices>,
    pub clock: Arc<ManualClock>,
}

pub fn harness() -> Harness {
    harness_with(RecordingNotifier::granted(), StaticPrices::default())
}

pub fn harness_with(notifier: RecordingNotifier, prices: StaticPrices) -> Harness {
    let kv = Arc::new(MemoryKv::default());
    let notifier = Arc::new(notifier);
    let prices = Arc::new(prices);
    let clock = Arc::new(ManualClock::at(epoch()));
    let state = AppState::new(
        RuntimeConfig::default(),
        kv.clone(),
        notifier.clone(),
        prices.clone(),
        clock.clone(),
    );
    Harness {
        state,
        kv,
        notifier,
        prices,
        clock,
    }
}

impl Harness {
    pub async fn seed(&self, players: Vec<PlayerRecord>) {
        self.state
            .players
            .modify(move |list| {
                *list = players;
                ((), true)
            })
            .await
            .unwrap();
    }
}
