use chrono::{DateTime, Utc};

use crate::entities::{PlayerRecord, MAX_FOCUS};
use crate::value_objects::CapPolicy;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Advances every player by the focus gained since its last update.
///
/// Returns how many records changed; callers persist the batch only when this is non-zero.
///
/// Under [`CapPolicy::LeaveStale`] a record whose projected value reaches `MAX_FOCUS`
/// is not touched at all, so its timestamp keeps aging and it stays below the cap
/// until something else writes it. [`CapPolicy::ClampAndCommit`] writes the cap instead.
pub fn advance_all(
    players: &mut [PlayerRecord],
    daily_rate: f64,
    now: DateTime<Utc>,
    policy: CapPolicy,
) -> usize {
    let mut updated = 0;
    for player in players.iter_mut() {
        if advance_player(player, daily_rate, now, policy) {
            updated += 1;
        }
    }
    updated
}

pub fn advance_player(
    player: &mut PlayerRecord,
    daily_rate: f64,
    now: DateTime<Utc>,
    policy: CapPolicy,
) -> bool {
    // A timestamp ahead of `now` must never lower the value.
    let elapsed_ms = now
        .signed_duration_since(player.last_update)
        .num_milliseconds()
        .max(0);
    let elapsed_hours = elapsed_ms as f64 / MILLIS_PER_HOUR;
    let gained = elapsed_hours * (daily_rate / 24.0);

    let cap = f64::from(MAX_FOCUS);
    let current = f64::from(player.current_value);
    let new_value = (current + gained).min(cap);

    if new_value == current {
        return false;
    }
    if new_value < cap {
        player.current_value = new_value.floor() as u32;
        player.last_update = now;
        return true;
    }
    match policy {
        CapPolicy::LeaveStale => false,
        CapPolicy::ClampAndCommit => {
            player.current_value = MAX_FOCUS;
            player.last_update = now;
            true
        }
    }
}
