//! Shared formatting helpers for user-facing text.

use crate::permissions::PermissionFlag;
use chrono::{DateTime, Utc};
use std::time::Duration;

const SECOND_MS: u64 = 1_000;
const MINUTE_MS: u64 = 60 * SECOND_MS;
const HOUR_MS: u64 = 60 * MINUTE_MS;
const DAY_MS: u64 = 24 * HOUR_MS;
const WEEK_MS: u64 = 7 * DAY_MS;
const MONTH_MS: u64 = 30 * DAY_MS;
const YEAR_MS: u64 = 365 * DAY_MS;

const UNITS: [(u64, &str); 6] = [
    (YEAR_MS, "y"),
    (MONTH_MS, "mo"),
    (WEEK_MS, "w"),
    (DAY_MS, "d"),
    (HOUR_MS, "h"),
    (MINUTE_MS, "m"),
];

/// Formats a duration as `1y 2mo 3w 4d 5h 6m 7s`, omitting zero parts.
///
/// Larger units are floored; the trailing seconds are rounded up so a
/// remaining cooldown of 1.2 seconds reads as `2s` rather than `1s`.
/// A zero duration yields an empty string.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let mut ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    let mut parts = Vec::new();

    for (unit, suffix) in UNITS {
        if ms >= unit {
            let n = ms / unit;
            parts.push(format!("{n}{suffix}"));
            ms -= n * unit;
        }
    }

    let seconds = ms.div_ceil(SECOND_MS);
    if seconds > 0 {
        parts.push(format!("{seconds}s"));
    }

    parts.join(" ")
}

/// Formats permissions as "`A`, `B` and `C`".
#[must_use]
pub fn format_permission_list(flags: &[PermissionFlag]) -> String {
    let labels: Vec<String> = flags.iter().map(|flag| format!("`{flag}`")).collect();
    match labels.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
    }
}

/// Formats a timestamp for display.
#[must_use]
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
