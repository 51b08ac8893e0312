//! Fitting a timeline's visible window to an item's span.

use log::{debug, error};

use crate::config::SyncConfig;
use crate::error::{Missing, SyncError};
use crate::timeline::lookup::get_item_data;
use crate::timeline::registry::TimelineRegistry;
use crate::timeline::widget::WindowOptions;

/// Set the visible window of `timeline_id` to `[item.start, item.end + padding]`.
///
/// A missing item is a no-op. Widget failures are logged.
pub fn fit_window_to_item(
    timelines: &TimelineRegistry,
    config: &SyncConfig,
    timeline_id: &str,
    item_id: &str,
) {
    let Some(data) = get_item_data(timelines, timeline_id, item_id) else {
        return;
    };

    let start = data.start;
    let end = data.end + config.window_padding_ms;
    let options = WindowOptions {
        animation: config.animate_window,
    };

    let result = timelines
        .with_mut(timeline_id, |widget| widget.set_window(start, end, options))
        .ok_or_else(|| SyncError::from(Missing::TimelineInstance(timeline_id.to_string())))
        .and_then(|r| r.map_err(|e| SyncError::operation_failed(timeline_id, e)));

    match result {
        Ok(()) => debug!("Window of {} fitted to {}: [{}, {}]", timeline_id, item_id, start, end),
        Err(e) => error!("Error setting timeline window: {}", e),
    }
}
