use std::sync::atomic::{AtomicBool, Ordering};

use backend_domain::services::advance_all;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::{AppError, AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AccrualOutcome {
    Completed { advanced: usize, total: usize },
    /// Another run was still in progress.
    Skipped,
}

struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Advances every stored player to the current time in one locked read-modify-write.
pub async fn run_accrual(state: &AppState) -> Result<AccrualOutcome, AppError> {
    let Some(_in_flight) = InFlight::acquire(&state.accrual_in_flight) else {
        debug!("accrual already running, skipping");
        return Ok(AccrualOutcome::Skipped);
    };

    let now = state.clock.now();
    let daily_gain = state.config.daily_gain;
    let policy = state.config.cap_policy;
    let result = state
        .players
        .modify(|players| {
            let advanced = advance_all(players, daily_gain, now, policy);
            ((advanced, players.len()), advanced > 0)
        })
        .await;

    match result {
        Ok((advanced, total)) => {
            state.metrics.record_accrual(advanced);
            info!(advanced, total, "accrual run complete");
            Ok(AccrualOutcome::Completed { advanced, total })
        }
        Err(err) => {
            state.metrics.record_accrual_error();
            error!("accrual run failed: {:#}", err);
            Err(AppError::storage(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{epoch, harness, sample_player};
    use backend_domain::{CapPolicy, MAX_FOCUS};
    use chrono::Duration;

    #[tokio::test]
    async fn advances_and_persists() {
        let h = harness();
        h.seed(vec![sample_player("a", 29_000), sample_player("b", 29_100)])
            .await;
        h.clock.advance(Duration::hours(2));
        let writes = h.kv.writes();

        let outcome = run_accrual(&h.state).await.unwrap();
        assert_eq!(outcome, AccrualOutcome::Completed { advanced: 2, total: 2 });
        assert_eq!(h.kv.writes(), writes + 1);

        let players = h.state.players.load().await.unwrap();
        assert_eq!(players[0].current_value, 29_833);
        assert_eq!(players[1].current_value, 29_933);
        assert_eq!(players[0].last_update, epoch() + Duration::hours(2));
    }

    #[tokio::test]
    async fn stale_policy_leaves_capped_player_alone() {
        let h = harness();
        h.seed(vec![sample_player("a", 29_900)]).await;
        h.clock.advance(Duration::hours(3));
        let writes = h.kv.writes();

        let outcome = run_accrual(&h.state).await.unwrap();
        assert_eq!(outcome, AccrualOutcome::Completed { advanced: 0, total: 1 });
        assert_eq!(h.kv.writes(), writes);
        let players = h.state.players.load().await.unwrap();
        assert_eq!(players[0].current_value, 29_900);
        assert_eq!(players[0].last_update, epoch());
    }

    #[tokio::test]
    async fn clamp_policy_commits_cap() {
        let mut h = harness();
        h.state.config.cap_policy = CapPolicy::ClampAndCommit;
        h.seed(vec![sample_player("a", 29_900)]).await;
        h.clock.advance(Duration::hours(3));

        run_accrual(&h.state).await.unwrap();
        let players = h.state.players.load().await.unwrap();
        assert_eq!(players[0].current_value, MAX_FOCUS);
    }

    #[tokio::test]
    async fn reentrant_run_is_skipped() {
        let h = harness();
        h.state.accrual_in_flight.store(true, Ordering::SeqCst);
        assert_eq!(run_accrual(&h.state).await.unwrap(), AccrualOutcome::Skipped);

        h.state.accrual_in_flight.store(false, Ordering::SeqCst);
        assert!(matches!(
            run_accrual(&h.state).await.unwrap(),
            AccrualOutcome::Completed { .. }
        ));
        assert!(!h.state.accrual_in_flight.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn write_failure_releases_guard() {
        let h = harness();
        h.seed(vec![sample_player("a", 100)]).await;
        h.clock.advance(Duration::hours(1));
        h.kv.fail_writes(true);

        assert!(matches!(run_accrual(&h.state).await, Err(AppError::Storage(_))));
        assert!(!h.state.accrual_in_flight.load(Ordering::SeqCst));
    }
}
