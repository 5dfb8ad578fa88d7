use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio::time::{timeout, Duration};
use tracing::error;

use backend_application::commands::notification_commands;
use backend_application::queries::notification_queries;
use backend_application::AppState;
use backend_domain::{NotificationDelivery, NotificationStatus, NotificationToggle};

use crate::error::HttpError;
use crate::middleware::authorize;

#[derive(Deserialize)]
pub struct DeliveryQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct CheckResult {
    pub notified: usize,
}

#[derive(Serialize)]
struct TargetStatus {
    status: &'static str,
}

pub async fn get_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<NotificationStatus>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let status = notification_queries::notification_status(&state).await?;
    Ok(Json(status))
}

pub async fn update_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<NotificationToggle>, JsonRejection>,
) -> Result<Json<NotificationStatus>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let Json(payload) = payload?;
    let status = if payload.enabled {
        notification_commands::enable_notifications(&state).await?
    } else {
        notification_commands::disable_notifications(&state).await?
    };
    Ok(Json(status))
}

pub async fn check_now(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CheckResult>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let notified = notification_commands::check_and_notify(&state).await?;
    Ok(Json(CheckResult { notified }))
}

pub async fn list_deliveries(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DeliveryQuery>,
) -> Result<Json<Vec<NotificationDelivery>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let deliveries = notification_queries::list_deliveries(&state, query.limit).await;
    Ok(Json(deliveries))
}

pub async fn last_delivery(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Option<NotificationDelivery>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    Ok(Json(state.notifier.last_delivery().await))
}

pub async fn target_check(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorize(&state.config, &headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(TargetStatus {
                status: "unauthorized",
            }),
        )
            .into_response();
    }

    let timeout_secs = state.config.request_timeout_seconds.max(1);
    match timeout(Duration::from_secs(timeout_secs), state.notifier.check_target()).await {
        Ok(Ok(())) => (StatusCode::OK, Json(TargetStatus { status: "ok" })).into_response(),
        Ok(Err(err)) => {
            error!("notification target check failed: {:#}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(TargetStatus { status: "error" }),
            )
                .into_response()
        }
        Err(_) => {
            error!("notification target check timeout after {}s", timeout_secs);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(TargetStatus { status: "timeout" }),
            )
                .into_response()
        }
    }
}
