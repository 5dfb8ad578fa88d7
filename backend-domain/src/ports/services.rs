use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    NotificationDelivery, NotificationMessage, NotificationPermission, PriceRecord,
};

/// Platform notification capability. Dispatch is best effort.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn permission(&self) -> NotificationPermission;
    async fn request_permission(&self) -> NotificationPermission;
    async fn dispatch(&self, message: &NotificationMessage) -> anyhow::Result<()>;
    async fn check_target(&self) -> anyhow::Result<()>;
    async fn list_deliveries(&self, limit: usize) -> Vec<NotificationDelivery>;
    async fn last_delivery(&self) -> Option<NotificationDelivery>;
}

/// Read-only market data. `None` means "no data": transport and status failures are not errors.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_prices(
        &self,
        item_ids: &[String],
        locations: &[String],
        qualities: &[u8],
    ) -> Option<Vec<PriceRecord>>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
