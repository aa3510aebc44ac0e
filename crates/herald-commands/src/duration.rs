//! Parsing of human-written durations such as `1h30m` or `2 days 4h`.

use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;

/// A whole duration: one or more `<number> <unit>` runs. Whitespace may sit
/// between a number and its unit or between runs, never inside either.
static DURATION_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\d+(?:\.\d+)?\s*[a-z]+\s*)+$").expect("Invalid duration text regex pattern")
});

/// A single `<number> <unit>` run.
static DURATION_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*([a-z]+)").expect("Invalid duration run regex pattern")
});

const SECOND_MS: f64 = 1_000.0;
const MINUTE_MS: f64 = 60.0 * SECOND_MS;
const HOUR_MS: f64 = 60.0 * MINUTE_MS;
const DAY_MS: f64 = 24.0 * HOUR_MS;

/// Errors produced while parsing a duration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    /// Nothing to parse.
    #[error("duration is empty")]
    Empty,
    /// Text is not a sequence of number/unit runs.
    #[error("'{0}' is not a duration")]
    Malformed(String),
    /// A run used a unit we do not know.
    #[error("unknown duration unit '{0}'")]
    UnknownUnit(String),
    /// The sum does not fit a duration.
    #[error("duration is too large")]
    Overflow,
}

fn unit_millis(unit: &str) -> Option<f64> {
    let millis = match unit {
        "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 1.0,
        "s" | "sec" | "secs" | "second" | "seconds" => SECOND_MS,
        "m" | "min" | "mins" | "minute" | "minutes" => MINUTE_MS,
        "h" | "hr" | "hrs" | "hour" | "hours" => HOUR_MS,
        "d" | "day" | "days" => DAY_MS,
        "w" | "wk" | "wks" | "week" | "weeks" => 7.0 * DAY_MS,
        "mo" | "month" | "months" => 30.0 * DAY_MS,
        "y" | "yr" | "yrs" | "year" | "years" => 365.0 * DAY_MS,
        _ => return None,
    };
    Some(millis)
}

/// Parses text such as `500ms`, `2s`, `1h30m` or `1.5 days` into a duration.
///
/// Units are case-insensitive and may be separated from their number by
/// whitespace (`1 Hour 30 Minutes`). Every number needs its own unit, so
/// `1 30m` is rejected rather than read as `130m`. The magnitudes of all runs
/// are summed.
pub fn parse_duration(text: &str) -> Result<Duration, DurationError> {
    let text = text.trim().to_lowercase();

    if text.is_empty() {
        return Err(DurationError::Empty);
    }
    if !DURATION_TEXT.is_match(&text) {
        return Err(DurationError::Malformed(text));
    }

    let mut total_ms = 0.0_f64;
    for run in DURATION_RUN.captures_iter(&text) {
        let magnitude: f64 = run[1]
            .parse()
            .map_err(|_| DurationError::Malformed(run[0].to_string()))?;
        let unit = unit_millis(&run[2]).ok_or_else(|| DurationError::UnknownUnit(run[2].to_string()))?;
        total_ms += magnitude * unit;
    }

    #[allow(clippy::cast_precision_loss)]
    let ceiling = u64::MAX as f64;
    if !total_ms.is_finite() || total_ms >= ceiling {
        return Err(DurationError::Overflow);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(Duration::from_millis(total_ms.round() as u64))
}
