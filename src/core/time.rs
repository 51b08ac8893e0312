//! Time representation for timeline markers and item spans.
//! Timestamps are milliseconds (f64), matching what the timeline widget stores.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Milliseconds since the timeline origin (or the Unix epoch for absolute dates)
pub type Timestamp = f64;

/// Time constants for conversions
pub mod constants {
    pub const MILLIS_PER_SECOND: f64 = 1_000.0;
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
    pub const SECONDS_PER_MINUTE: f64 = 60.0;

    /// Finest zoom step of the timeline, in milliseconds
    pub const DEFAULT_FRAME_STEP_MS: u32 = 50;
}

/// Time zero constant
pub const ZERO: Timestamp = 0.0;

/// Convert seconds to milliseconds
#[inline]
pub fn from_seconds(seconds: f64) -> Timestamp {
    seconds * constants::MILLIS_PER_SECOND
}

/// Convert milliseconds to seconds
#[inline]
pub fn to_seconds(millis: Timestamp) -> f64 {
    millis / constants::MILLIS_PER_SECOND
}

/// Linear interpolation between `start` and `end`.
///
/// `position` is not clamped: values outside `[0, 1]` extrapolate past the span.
#[inline]
pub fn lerp(start: Timestamp, end: Timestamp, position: f64) -> Timestamp {
    start + (end - start) * position
}

/// Convert a frame index to a timestamp, rounded up to the next multiple of `step_ms`.
///
/// Returns `ZERO` for a non-positive frame rate or a zero step.
pub fn frame_to_timestamp(frame: u64, fps: f64, step_ms: u32) -> Timestamp {
    if fps <= 0.0 || step_ms == 0 {
        return ZERO;
    }
    let exact_ms = (frame as f64 / fps) * constants::MILLIS_PER_SECOND;
    let step = f64::from(step_ms);
    (exact_ms / step).ceil() * step
}

/// Parse a timeline date into milliseconds.
///
/// Integers (and floats) are taken as milliseconds already; strings are parsed
/// as ISO 8601. Strings without an offset (naive datetimes and plain dates) are
/// read as UTC. Anything else, including unparsable strings, is zero.
pub fn parse_date_millis(value: &Value) -> Timestamp {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(ZERO),
        Value::String(s) => parse_iso_millis(s).unwrap_or(ZERO),
        _ => ZERO,
    }
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

fn parse_iso_millis(s: &str) -> Option<Timestamp> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis() as Timestamp);
    }
    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    Some(naive.and_utc().timestamp_millis() as Timestamp)
}

/// Format time as HH:MM:SS.mmm
pub fn format_time(millis: Timestamp) -> String {
    let total_millis = millis.max(0.0).round() as i64;
    let total_seconds = total_millis / 1000;
    let hours = total_seconds / constants::SECONDS_PER_HOUR as i64;
    let minutes = (total_seconds % constants::SECONDS_PER_HOUR as i64)
        / constants::SECONDS_PER_MINUTE as i64;
    let seconds = total_seconds % constants::SECONDS_PER_MINUTE as i64;
    let rem = total_millis % 1000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, rem)
}
