//! The seam to the timeline widget.
//!
//! Only the calls the sync glue needs: custom time markers, item lookup and
//! the visible window.

use std::collections::HashMap;

use crate::core::time::Timestamp;
use crate::timeline::item::{ItemId, TimelineItem};

/// Error type for widget calls
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WidgetError {
    #[error("no custom time bar with id {0}")]
    UnknownCustomTime(String),
    #[error("a custom time bar with id {0} already exists")]
    DuplicateCustomTime(String),
    #[error("invalid window: start {start} must be before end {end}")]
    InvalidWindow { start: Timestamp, end: Timestamp },
}

/// Options for [`TimelineWidget::set_window`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowOptions {
    pub animation: bool,
}

/// Visible range of a timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub start: Timestamp,
    pub end: Timestamp,
}

pub trait TimelineWidget {
    /// Current time of the custom time bar `key`, if one exists
    fn custom_time(&self, key: &str) -> Option<Timestamp>;

    /// Move an existing custom time bar. Fails if `key` does not exist.
    fn set_custom_time(&mut self, time: Timestamp, key: &str) -> Result<(), WidgetError>;

    /// Create a custom time bar. Fails if `key` already exists.
    fn add_custom_time(&mut self, time: Timestamp, key: &str) -> Result<(), WidgetError>;

    /// The widget's item collection, `None` before items are attached
    fn items(&self) -> Option<&HashMap<ItemId, TimelineItem>>;

    fn set_window(
        &mut self,
        start: Timestamp,
        end: Timestamp,
        options: WindowOptions,
    ) -> Result<(), WidgetError>;

    fn window(&self) -> Option<Window>;
}
