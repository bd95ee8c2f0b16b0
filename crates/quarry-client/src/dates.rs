//! Epoch-second display formatting.
//!
//! The service sends every timestamp as epoch seconds. These helpers turn
//! them into UTC display text with the patterns owned by
//! [`crate::messages`].

/// Format epoch seconds as UTC text using a `chrono` strftime pattern.
///
/// Epochs outside chrono's representable range fall back to the raw
/// number; remote data never panics the renderer.
#[must_use]
pub fn format_epoch(secs: i64, pattern: &str) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .map_or_else(|| secs.to_string(), |when| when.format(pattern).to_string())
}

/// Day-precision date in the process language.
#[must_use]
pub fn format_day(secs: i64) -> String {
    format_epoch(secs, crate::messages::day_pattern())
}

/// Minute-precision timestamp in the process language.
#[must_use]
pub fn format_minute(secs: i64) -> String {
    format_epoch(secs, crate::messages::minute_pattern())
}
