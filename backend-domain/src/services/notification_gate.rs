use chrono::{DateTime, Duration, Utc};

use crate::entities::PlayerRecord;

pub const DEFAULT_NOTIFICATION_COOLDOWN_HOURS: u64 = 24;

/// Whether a "focus full" alert should fire for `player` now.
///
/// The caller records `now` as the player's last notification once this returns true.
pub fn should_notify(
    player: &PlayerRecord,
    last_notified_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    cooldown: Duration,
) -> bool {
    if !player.is_full() {
        return false;
    }
    match last_notified_at {
        None => true,
        Some(last) => now.signed_duration_since(last) >= cooldown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::MAX_FOCUS;
    use crate::value_objects::{PlayerId, Region};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 8, 30, 0).unwrap()
    }

    fn day() -> Duration {
        Duration::hours(DEFAULT_NOTIFICATION_COOLDOWN_HOURS as i64)
    }

    fn player(current_value: u32) -> PlayerRecord {
        PlayerRecord {
            id: PlayerId::from("player_1"),
            email: "miner@example.com".to_string(),
            nickname: "Miner".to_string(),
            region: Region::Asia,
            current_value,
            last_update: now(),
        }
    }

    #[test]
    fn below_cap_never_fires() {
        assert!(!should_notify(&player(MAX_FOCUS - 1), None, now(), day()));
        assert!(!should_notify(&player(0), None, now(), day()));
    }

    #[test]
    fn first_time_at_cap_fires() {
        assert!(should_notify(&player(MAX_FOCUS), None, now(), day()));
    }

    #[test]
    fn cooldown_suppresses_until_a_day_has_passed() {
        let full = player(MAX_FOCUS);
        let fired_at = now();
        assert!(!should_notify(&full, Some(fired_at), fired_at, day()));
        assert!(!should_notify(&full, Some(fired_at), fired_at + Duration::hours(23), day()));
        assert!(!should_notify(
            &full,
            Some(fired_at),
            fired_at + Duration::hours(24) - Duration::milliseconds(1),
            day()
        ));
        assert!(should_notify(&full, Some(fired_at), fired_at + Duration::hours(24), day()));
    }

    #[test]
    fn fires_once_per_window_when_continuously_full() {
        let full = player(MAX_FOCUS);
        let mut last = None;
        let mut fired = 0;
        // Hourly checks over three days.
        for hour in 0..72 {
            let at = now() + Duration::hours(hour);
            if should_notify(&full, last, at, day()) {
                fired += 1;
                last = Some(at);
            }
        }
        assert_eq!(fired, 3);
    }
}
