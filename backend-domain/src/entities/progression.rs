// Progression entity
// Derived time-to-cap figures, never persisted

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressionResult {
    pub current: u32,
    pub target: u32,
    pub remaining: u32,
    pub hours_needed: u64,
    pub minutes_needed: u32,
    pub total_minutes_needed: u64,
    pub progress_percent: f64,
}

impl ProgressionResult {
    pub fn completion_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if self.total_minutes_needed == 0 {
            return None;
        }
        let minutes = i64::try_from(self.total_minutes_needed).ok()?;
        now.checked_add_signed(Duration::try_minutes(minutes)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgressionQuery {
    pub current: u32,
    pub target: Option<u32>,
    pub daily_gain: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressionView {
    #[serde(flatten)]
    pub result: ProgressionResult,
    pub daily_gain: f64,
    pub completion_at: Option<DateTime<Utc>>,
}

impl ProgressionView {
    pub fn new(result: ProgressionResult, daily_gain: f64, now: DateTime<Utc>) -> Self {
        Self {
            result,
            daily_gain,
            completion_at: result.completion_at(now),
        }
    }
}
