use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use backend_application::commands::player_commands;
use backend_application::queries::player_queries;
use backend_application::AppState;
use backend_domain::{PlayerInput, PlayerPatch, PlayerRecord, ProgressionView};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn list_players(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<PlayerRecord>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    Ok(Json(player_queries::list_players(&state).await))
}

pub async fn create_player(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PlayerInput>, JsonRejection>,
) -> Result<(StatusCode, Json<PlayerRecord>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let Json(payload) = payload?;
    let player = player_commands::create_player(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn get_player(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<PlayerRecord>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    player_queries::get_player(&state, &id)
        .await
        .map(Json)
        .ok_or(HttpError::NotFound)
}

pub async fn update_player(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<PlayerPatch>, JsonRejection>,
) -> Result<Json<PlayerRecord>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let Json(payload) = payload?;
    player_commands::update_player(&state, &id, payload)
        .await?
        .map(Json)
        .ok_or(HttpError::NotFound)
}

pub async fn delete_player(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    if player_commands::delete_player(&state, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(HttpError::NotFound)
    }
}

pub async fn player_progression(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ProgressionView>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    player_queries::player_progression(&state, &id)
        .await
        .map(Json)
        .ok_or(HttpError::NotFound)
}
