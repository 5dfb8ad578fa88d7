use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    accrual_runs: AtomicU64,
    accrual_errors: AtomicU64,
    players_advanced: AtomicU64,
    notifications_sent: AtomicU64,
    notifications_failed: AtomicU64,
    price_fetches: AtomicU64,
    price_fetch_failures: AtomicU64,
}

impl Metrics {
    pub fn record_accrual(&self, advanced: usize) {
        self.accrual_runs.fetch_add(1, Ordering::Relaxed);
        self.players_advanced
            .fetch_add(advanced as u64, Ordering::Relaxed);
    }

    pub fn record_accrual_error(&self) {
        self.accrual_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_notification(&self, delivered: bool) {
        if delivered {
            self.notifications_sent.fetch_add(1, Ordering::Relaxed);
        } else {
            self.notifications_failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_price_fetch(&self, ok: bool) {
        self.price_fetches.fetch_add(1, Ordering::Relaxed);
        if !ok {
            self.price_fetch_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn render_prometheus(&self) -> String {
        let accrual_runs = self.accrual_runs.load(Ordering::Relaxed);
        let accrual_errors = self.accrual_errors.load(Ordering::Relaxed);
        let advanced = self.players_advanced.load(Ordering::Relaxed);
        let sent = self.notifications_sent.load(Ordering::Relaxed);
        let failed = self.notifications_failed.load(Ordering::Relaxed);
        let fetches = self.price_fetches.load(Ordering::Relaxed);
        let fetch_failures = self.price_fetch_failures.load(Ordering::Relaxed);

        format!(
            "# TYPE focus_accrual_runs_total counter\n\
focus_accrual_runs_total {}\n\
# TYPE focus_accrual_errors_total counter\n\
focus_accrual_errors_total {}\n\
# TYPE focus_players_advanced_total counter\n\
focus_players_advanced_total {}\n\
# TYPE focus_notifications_sent_total counter\n\
focus_notifications_sent_total {}\n\
# TYPE focus_notifications_failed_total counter\n\
focus_notifications_failed_total {}\n\
# TYPE focus_price_fetches_total counter\n\
focus_price_fetches_total {}\n\
# TYPE focus_price_fetch_failures_total counter\n\
focus_price_fetch_failures_total {}\n",
            accrual_runs, accrual_errors, advanced, sent, failed, fetches, fetch_failures
        )
    }
}
