use axum::routing::{get, post};
use axum::Router;

use backend_application::AppState;

use crate::handlers::{
    focus_handlers, notification_handlers, ops_handlers, player_handlers, price_handlers,
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/players",
            get(player_handlers::list_players).post(player_handlers::create_player),
        )
        .route(
            "/v1/players/:id",
            get(player_handlers::get_player)
                .put(player_handlers::update_player)
                .delete(player_handlers::delete_player),
        )
        .route(
            "/v1/players/:id/progression",
            get(player_handlers::player_progression),
        )
        .route("/v1/focus/calculate", get(focus_handlers::calculate))
        .route("/v1/focus/accrual/run", post(focus_handlers::run_accrual))
        .route(
            "/v1/notifications",
            get(notification_handlers::get_status).put(notification_handlers::update_status),
        )
        .route(
            "/v1/notifications/check",
            post(notification_handlers::check_now),
        )
        .route(
            "/v1/notifications/deliveries",
            get(notification_handlers::list_deliveries),
        )
        .route(
            "/v1/notifications/deliveries/last",
            get(notification_handlers::last_delivery),
        )
        .route(
            "/v1/notifications/target/check",
            get(notification_handlers::target_check),
        )
        .route("/v1/prices", get(price_handlers::list_prices))
        .route("/v1/ops/health/live", get(ops_handlers::health_live))
        .route("/v1/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/v1/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
