use chrono::{DateTime, Utc};

/// Countdown display, `HH : MM : SS` with zero padding.
#[must_use]
pub fn format_countdown(total_secs: u32) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02} : {minutes:02} : {seconds:02}")
}

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

/// Scoreboard duration column, minutes to three decimals.
#[must_use]
pub fn format_duration_mins(minutes: f64) -> String {
    format!("{minutes:.3}")
}
