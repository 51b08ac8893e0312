//! Item data lookup: instance, then item collection, then item, then data.

use log::{error, warn};

use crate::error::{Missing, SyncError};
use crate::timeline::item::ItemData;
use crate::timeline::registry::TimelineRegistry;

/// Resolve the data record of `item_id` on timeline `timeline_id`.
///
/// Each missing level is its own [`Missing`] variant.
pub fn try_item_data(
    timelines: &TimelineRegistry,
    timeline_id: &str,
    item_id: &str,
) -> Result<ItemData, SyncError> {
    timelines
        .with(timeline_id, |widget| -> Result<ItemData, Missing> {
            let items = widget
                .items()
                .ok_or_else(|| Missing::ItemCollection(timeline_id.to_string()))?;
            let item = items.get(item_id).ok_or_else(|| Missing::Item {
                timeline_id: timeline_id.to_string(),
                item_id: item_id.to_string(),
            })?;
            item.data.clone().ok_or_else(|| Missing::ItemData {
                timeline_id: timeline_id.to_string(),
                item_id: item_id.to_string(),
            })
        })
        .unwrap_or_else(|| Err(Missing::TimelineInstance(timeline_id.to_string())))
        .map_err(SyncError::from)
}

/// Like [`try_item_data`], but every absence is logged and becomes `None`.
pub fn get_item_data(
    timelines: &TimelineRegistry,
    timeline_id: &str,
    item_id: &str,
) -> Option<ItemData> {
    match try_item_data(timelines, timeline_id, item_id) {
        Ok(data) => Some(data),
        Err(SyncError::NotFound(missing @ Missing::Item { .. })) => {
            warn!("{}", missing);
            None
        }
        Err(e) => {
            error!("{}", e);
            None
        }
    }
}
