use backend_domain::ports::{notified_key, NOTIFICATION_ENABLED_KEY};
use backend_domain::services::should_notify;
use backend_domain::{millis_to_utc, NotificationMessage, NotificationPermission, NotificationStatus};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::queries::notification_queries::{notification_status, notifications_enabled};
use crate::{AppError, AppState};

/// Asks the notifier for permission and stores the flag only when it is granted.
pub async fn enable_notifications(state: &AppState) -> Result<NotificationStatus, AppError> {
    let permission = state.notifier.request_permission().await;
    let enabled = permission == NotificationPermission::Granted;
    state
        .store
        .set(NOTIFICATION_ENABLED_KEY, Value::Bool(enabled))
        .await
        .map_err(AppError::storage)?;
    if enabled {
        info!("notifications enabled");
    } else {
        warn!(?permission, "notification permission not granted");
    }
    Ok(NotificationStatus {
        enabled,
        permission,
    })
}

pub async fn disable_notifications(state: &AppState) -> Result<NotificationStatus, AppError> {
    state
        .store
        .set(NOTIFICATION_ENABLED_KEY, Value::Bool(false))
        .await
        .map_err(AppError::storage)?;
    info!("notifications disabled");
    notification_status(state).await
}

/// Sends a "focus full" alert to every capped player outside its cooldown.
///
/// Returns how many players passed the gate. Dispatch failures are logged and counted but
/// never fail the call.
pub async fn check_and_notify(state: &AppState) -> Result<usize, AppError> {
    if !notifications_enabled(state).await
        || state.notifier.permission() != NotificationPermission::Granted
    {
        debug!("notifications off, skipping check");
        return Ok(0);
    }

    let _serialized = state.notify_lock.lock().await;
    let players = state.players.load().await.map_err(AppError::storage)?;
    let cooldown = state.config.notification_cooldown();
    let now = state.clock.now();
    let mut fired = 0;

    for player in players.iter().filter(|player| player.is_full()) {
        let key = notified_key(player.id.as_str());
        let last_notified_at = match state.store.get(&key).await {
            Ok(value) => value.as_ref().and_then(marker_millis).and_then(millis_to_utc),
            Err(err) => {
                warn!(player_id = %player.id, "failed to read notification marker: {:#}", err);
                continue;
            }
        };
        if !should_notify(player, last_notified_at, now, cooldown) {
            continue;
        }

        if let Err(err) = state
            .store
            .set(&key, Value::from(now.timestamp_millis()))
            .await
        {
            warn!(player_id = %player.id, "failed to record notification marker: {:#}", err);
            continue;
        }
        fired += 1;

        let message = NotificationMessage::focus_full(player);
        match state.notifier.dispatch(&message).await {
            Ok(()) => {
                state.metrics.record_notification(true);
                info!(player_id = %player.id, "focus full notification sent");
            }
            Err(err) => {
                state.metrics.record_notification(false);
                warn!(player_id = %player.id, "notification dispatch failed: {:#}", err);
            }
        }
    }

    Ok(fired)
}

/// Markers from the browser build were stored as strings of epoch millis.
fn marker_millis(value: &Value) -> Option<i64> {
    match value {
        Value::String(raw) => raw.trim().parse().ok(),
        other => other.as_i64(),
    }
}
