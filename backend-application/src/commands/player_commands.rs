use backend_domain::ports::notified_key;
use backend_domain::{PlayerId, PlayerInput, PlayerPatch, PlayerRecord};
use tracing::{info, warn};

use crate::{AppError, AppState};

pub async fn create_player(state: &AppState, input: PlayerInput) -> Result<PlayerRecord, AppError> {
    let input = input.normalized();
    input.validate()?;

    let now = state.clock.now();
    let player = PlayerRecord::new(PlayerId::generate(now), input, now);
    let created = player.clone();
    state
        .players
        .modify(move |players| {
            players.push(player);
            ((), true)
        })
        .await
        .map_err(AppError::storage)?;

    info!(player_id = %created.id, region = created.region.as_str(), "player created");
    Ok(created)
}

pub async fn update_player(
    state: &AppState,
    id: &str,
    patch: PlayerPatch,
) -> Result<Option<PlayerRecord>, AppError> {
    let patch = patch.normalized();
    patch.validate()?;

    let now = state.clock.now();
    let updated = state
        .players
        .modify(|players| match players.iter_mut().find(|p| p.id.as_str() == id) {
            Some(player) => {
                player.apply(patch, now);
                (Some(player.clone()), true)
            }
            None => (None, false),
        })
        .await
        .map_err(AppError::storage)?;

    if let Some(player) = &updated {
        info!(player_id = %player.id, "player updated");
    }
    Ok(updated)
}

/// Removes the player and its notification cooldown marker.
pub async fn delete_player(state: &AppState, id: &str) -> Result<bool, AppError> {
    let removed = state
        .players
        .modify(|players| {
            let before = players.len();
            players.retain(|p| p.id.as_str() != id);
            let removed = players.len() != before;
            (removed, removed)
        })
        .await
        .map_err(AppError::storage)?;

    if removed {
        if let Err(err) = state.store.remove(&notified_key(id)).await {
            warn!(player_id = id, "failed to clear notification marker: {:#}", err);
        }
        info!(player_id = id, "player deleted");
    }
    Ok(removed)
}
