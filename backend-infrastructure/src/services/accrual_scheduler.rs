use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use backend_application::commands::accrual_commands::{run_accrual, AccrualOutcome};
use backend_application::commands::notification_commands::check_and_notify;
use backend_application::AppState;

/// Runs one tick immediately, then one every `accrual_interval_seconds`, until the task is dropped.
pub async fn schedule_accrual(state: AppState) {
    let period = Duration::from_secs(state.config.accrual_interval_seconds.max(1));
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(interval_seconds = period.as_secs(), "accrual scheduler started");

    loop {
        ticker.tick().await;
        run_scheduled_tick(&state).await;
    }
}

/// Accrual first, then the focus-full check. Failures are logged and the next tick runs anyway.
pub async fn run_scheduled_tick(state: &AppState) -> Option<AccrualOutcome> {
    let outcome = match run_accrual(state).await {
        Ok(outcome) => Some(outcome),
        Err(err) => {
            error!("scheduled accrual failed: {}", err);
            None
        }
    };
    if let Err(err) = check_and_notify(state).await {
        error!("scheduled notification check failed: {}", err);
    }
    outcome
}
