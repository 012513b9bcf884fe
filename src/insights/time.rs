//! Relative time formatting.

use chrono::NaiveDateTime;

fn plural(n: i64, unit: &str, units: &str) -> String {
    if n == 1 {
        format!("{n} {unit} ago")
    } else {
        format!("{n} {units} ago")
    }
}

/// Describe `timestamp` relative to `now`.
///
/// Under a minute is "just now"; under a week counts minutes, hours, or
/// days; anything older is shown as a date like `Mar 04, 2025`.
/// Timestamps in the future count as "just now".
#[must_use]
pub fn format_relative_time(timestamp: NaiveDateTime, now: NaiveDateTime) -> String {
    let seconds = (now - timestamp).num_seconds();

    match seconds {
        s if s < 60 => "just now".to_string(),
        s if s < 3_600 => plural(s / 60, "min", "mins"),
        s if s < 86_400 => plural(s / 3_600, "hour", "hours"),
        s if s < 604_800 => plural(s / 86_400, "day", "days"),
        _ => timestamp.format("%b %d, %Y").to_string(),
    }
}
