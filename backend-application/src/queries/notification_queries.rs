use backend_domain::ports::NOTIFICATION_ENABLED_KEY;
use backend_domain::{NotificationDelivery, NotificationStatus};
use serde_json::Value;
use tracing::warn;

use crate::{AppError, AppState};

pub const MAX_DELIVERY_PAGE: usize = 100;

pub async fn notifications_enabled(state: &AppState) -> bool {
    match state.store.get(NOTIFICATION_ENABLED_KEY).await {
        Ok(Some(Value::Bool(enabled))) => enabled,
        Ok(Some(Value::String(raw))) => raw.trim() == "true",
        Ok(_) => false,
        Err(err) => {
            warn!("failed to read notification flag: {:#}", err);
            false
        }
    }
}

pub async fn notification_status(state: &AppState) -> Result<NotificationStatus, AppError> {
    Ok(NotificationStatus {
        enabled: notifications_enabled(state).await,
        permission: state.notifier.permission(),
    })
}

/// Newest first.
pub async fn list_deliveries(state: &AppState, limit: Option<usize>) -> Vec<NotificationDelivery> {
    let limit = limit.unwrap_or(20).clamp(1, MAX_DELIVERY_PAGE);
    state.notifier.list_deliveries(limit).await
}
