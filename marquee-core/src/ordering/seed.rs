use chrono::{DateTime, Utc};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Rolling multiply-and-add hash of a string, wrapped to 32 bits.
/// The empty string hashes to 0.
pub fn identity_hash(value: &str) -> i32 {
    value.chars().fold(0i32, |hash, ch| {
        hash.wrapping_mul(31).wrapping_add(ch as i32)
    })
}

/// Deterministic seed for the current time window.
///
/// Two calls within the same window with the same salt return the same
/// value; crossing a window boundary or changing the salt changes it.
pub fn window_seed(window_hours: f64, salt: &str) -> i64 {
    window_seed_at(Utc::now(), window_hours, salt)
}

/// Pure form of [`window_seed`] with an explicit clock.
pub fn window_seed_at(
    now: DateTime<Utc>,
    window_hours: f64,
    salt: &str,
) -> i64 {
    debug_assert!(window_hours > 0.0);
    let window_millis = window_hours * MILLIS_PER_HOUR;
    let time_index =
        (now.timestamp_millis() as f64 / window_millis).floor() as i64;

    time_index + i64::from(identity_hash(salt))
}
