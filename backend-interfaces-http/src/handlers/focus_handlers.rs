use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;

use backend_application::commands::accrual_commands::{self, AccrualOutcome};
use backend_application::queries::player_queries;
use backend_application::AppState;
use backend_domain::{ProgressionQuery, ProgressionView};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn calculate(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<ProgressionQuery>, QueryRejection>,
) -> Result<Json<ProgressionView>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let Query(query) = query?;
    let view = player_queries::calculate_progression(&state, query)?;
    Ok(Json(view))
}

pub async fn run_accrual(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AccrualOutcome>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let outcome = accrual_commands::run_accrual(&state).await?;
    Ok(Json(outcome))
}
