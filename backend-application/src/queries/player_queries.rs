use backend_domain::services::compute_progression;
use backend_domain::{PlayerRecord, ProgressionQuery, ProgressionView, ValidationError, MAX_FOCUS};
use tracing::warn;

use crate::{AppError, AppState};

/// An unreadable collection lists as empty; writes still refuse to overwrite it.
pub async fn list_players(state: &AppState) -> Vec<PlayerRecord> {
    match state.players.load().await {
        Ok(players) => players,
        Err(err) => {
            warn!("failed to load players: {:#}", err);
            Vec::new()
        }
    }
}

pub async fn get_player(state: &AppState, id: &str) -> Option<PlayerRecord> {
    list_players(state)
        .await
        .into_iter()
        .find(|player| player.id.as_str() == id)
}

/// Time until the player's pool is full at the configured daily gain.
pub async fn player_progression(state: &AppState, id: &str) -> Option<ProgressionView> {
    let player = get_player(state, id).await?;
    let daily_gain = state.config.daily_gain;
    let result = compute_progression(player.current_value, MAX_FOCUS, daily_gain);
    Some(ProgressionView::new(result, daily_gain, state.clock.now()))
}

pub fn calculate_progression(
    state: &AppState,
    query: ProgressionQuery,
) -> Result<ProgressionView, AppError> {
    let daily_gain = query.daily_gain.unwrap_or(state.config.daily_gain);
    if !(daily_gain.is_finite() && daily_gain > 0.0) {
        return Err(ValidationError::NotPositive { field: "daily_gain" }.into());
    }
    let target = query.target.unwrap_or(MAX_FOCUS);
    let result = compute_progression(query.current, target, daily_gain);
    Ok(ProgressionView::new(result, daily_gain, state.clock.now()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{epoch, harness, sample_player};
    use backend_domain::ports::{KeyValueStore, PLAYERS_KEY};
    use chrono::Duration;
    use serde_json::json;

    #[tokio::test]
    async fn lists_and_finds_players() {
        let h = harness();
        h.seed(vec![sample_player("a", 1), sample_player("b", 2)]).await;
        assert_eq!(list_players(&h.state).await.len(), 2);
        assert_eq!(get_player(&h.state, "b").await.unwrap().current_value, 2);
        assert!(get_player(&h.state, "c").await.is_none());
    }

    #[tokio::test]
    async fn corrupt_collection_lists_empty() {
        let h = harness();
        h.kv.set(PLAYERS_KEY, json!("garbage")).await.unwrap();
        assert!(list_players(&h.state).await.is_empty());
    }

    #[tokio::test]
    async fn progression_uses_configured_gain() {
        let h = harness();
        h.seed(vec![sample_player("a", 0)]).await;
        let view = player_progression(&h.state, "a").await.unwrap();
        assert_eq!(view.result.hours_needed, 72);
        assert_eq!(view.daily_gain, 10_000.0);
        assert_eq!(view.completion_at, Some(epoch() + Duration::hours(72)));
        assert!(player_progression(&h.state, "missing").await.is_none());
    }

    #[tokio::test]
    async fn calculator_defaults_and_validates() {
        let h = harness();
        let view = calculate_progression(
            &h.state,
            ProgressionQuery {
                current: 29_850,
                target: None,
                daily_gain: Some(2_400.0),
            },
        )
        .unwrap();
        assert_eq!(view.result.target, MAX_FOCUS);
        assert_eq!(view.result.total_minutes_needed, 90);

        let err = calculate_progression(
            &h.state,
            ProgressionQuery {
                current: 0,
                target: None,
                daily_gain: Some(0.0),
            },
        )
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
