use crate::entities::ProgressionResult;

/// Time needed to accrue from `current` to `target` at `daily_rate` per 24 hours.
///
/// `daily_rate` must be positive; callers validate it before getting here.
pub fn compute_progression(current: u32, target: u32, daily_rate: f64) -> ProgressionResult {
    let remaining = target.saturating_sub(current);
    let rate_per_hour = daily_rate / 24.0;
    let total_hours = if remaining > 0 {
        f64::from(remaining) / rate_per_hour
    } else {
        0.0
    };

    let hours_needed = total_hours.floor();
    let minutes_needed = ((total_hours - hours_needed) * 60.0).floor();
    let total_minutes_needed = (total_hours * 60.0).ceil();

    let progress_percent = if target > 0 {
        (f64::from(current) / f64::from(target) * 100.0).min(100.0)
    } else {
        0.0
    };

    ProgressionResult {
        current,
        target,
        remaining,
        hours_needed: hours_needed as u64,
        minutes_needed: minutes_needed as u32,
        total_minutes_needed: total_minutes_needed as u64,
        progress_percent,
    }
}
