//! Custom time bar (marker) updates.
//!
//! A marker is upserted: moved if `key` exists on the timeline, created
//! otherwise. One marker per key per timeline.

use log::{error, trace};

use crate::core::time::{lerp, Timestamp};
use crate::error::{Missing, SyncError};
use crate::timeline::registry::TimelineRegistry;

/// Upsert the custom time bar `key` on `timeline_id` at `timestamp`.
pub fn try_set_marker(
    timelines: &TimelineRegistry,
    timeline_id: &str,
    key: &str,
    timestamp: Timestamp,
) -> Result<(), SyncError> {
    timelines
        .with_mut(timeline_id, |widget| {
            if widget.custom_time(key).is_some() {
                widget.set_custom_time(timestamp, key)
            } else {
                widget.add_custom_time(timestamp, key)
            }
        })
        .ok_or_else(|| Missing::TimelineInstance(timeline_id.to_string()))?
        .map_err(|e| SyncError::operation_failed(timeline_id, e))?;

    trace!("marker {}/{} -> {}", timeline_id, key, timestamp);
    Ok(())
}

/// Upsert a marker, logging instead of returning failures.
pub fn set_marker(timelines: &TimelineRegistry, timeline_id: &str, key: &str, timestamp: Timestamp) {
    if let Err(e) = try_set_marker(timelines, timeline_id, key, timestamp) {
        error!("Failed to set time bar: {}", e);
    }
}

/// Upsert a marker at `position` within `[range_start, range_end]`.
///
/// `position` is not clamped; values outside `[0, 1]` place the marker
/// outside the range.
pub fn set_marker_normalized(
    timelines: &TimelineRegistry,
    timeline_id: &str,
    key: &str,
    range_start: Timestamp,
    range_end: Timestamp,
    position: f64,
) {
    set_marker(timelines, timeline_id, key, lerp(range_start, range_end, position));
}
