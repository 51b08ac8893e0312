//! Error types for timeline and video sync operations.
//!
//! Every public entry point in [`crate::ui::TimelineBridge`] converts these
//! into a logged no-op; they only surface from the lower-level helpers.

use crate::timeline::WidgetError;

/// What was missing when a lookup failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Missing {
    #[error("timeline instance {0} not found")]
    TimelineInstance(String),
    #[error("items of timeline {0} not found")]
    ItemCollection(String),
    #[error("item {item_id} not found in timeline {timeline_id}")]
    Item { timeline_id: String, item_id: String },
    #[error("data of item {item_id} not found in timeline {timeline_id}")]
    ItemData { timeline_id: String, item_id: String },
    #[error("video container {0} not found")]
    Container(String),
    #[error("progress element not found in container {0}")]
    ProgressElement(String),
}

/// Error type for sync operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyncError {
    #[error("Not found: {0}")]
    NotFound(#[from] Missing),
    #[error("Operation failed on timeline {timeline_id}: {source}")]
    OperationFailed {
        timeline_id: String,
        #[source]
        source: WidgetError,
    },
}

impl SyncError {
    pub fn operation_failed(timeline_id: &str, source: WidgetError) -> Self {
        SyncError::OperationFailed {
            timeline_id: timeline_id.to_string(),
            source,
        }
    }

    /// Check if this is a lookup failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, SyncError::NotFound(_))
    }
}
