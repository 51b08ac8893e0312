//! Timeline item and its data record.
//!
//! Items are owned by the timeline widget. This crate only reads their data,
//! except when building a timeline from loaded data.

use crate::core::time::{self, Timestamp};

/// Unique identifier for an item within one timeline
pub type ItemId = String;

/// Group the reference "track length" item lives in
pub const TRACK_LENGTH_GROUP: &str = "track-length";

/// How the widget renders an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemKind {
    #[default]
    Range,
    Box,
    Point,
    Background,
}

impl ItemKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "range" => Some(ItemKind::Range),
            "box" => Some(ItemKind::Box),
            "point" => Some(ItemKind::Point),
            "background" => Some(ItemKind::Background),
            _ => None,
        }
    }
}

/// The stored data record of an item.
///
/// `start` and `end` are absolute timestamps in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemData {
    pub start: Timestamp,
    pub end: Timestamp,
    pub content: String,
    pub group: Option<String>,
    pub kind: ItemKind,
    pub selectable: bool,
    pub class_name: Option<String>,
}

impl ItemData {
    /// Create a plain range record
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self {
            start,
            end,
            content: String::new(),
            group: None,
            kind: ItemKind::Range,
            selectable: true,
            class_name: None,
        }
    }

    /// Length of the span, `end - start`
    pub fn duration(&self) -> Timestamp {
        self.end - self.start
    }

    pub fn contains(&self, position: Timestamp) -> bool {
        position >= self.start && position <= self.end
    }
}

/// An item as held by the widget. `data` is `None` for an item whose record
/// has not been attached (or was cleared).
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineItem {
    pub id: ItemId,
    pub data: Option<ItemData>,
}

impl TimelineItem {
    pub fn new(id: impl Into<ItemId>, data: ItemData) -> Self {
        Self {
            id: id.into(),
            data: Some(data),
        }
    }

    /// An item with no data record
    pub fn empty(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            data: None,
        }
    }

    /// Build the non-selectable background item spanning the whole video.
    ///
    /// Ends at the timestamp of the last frame, rounded up to `step_ms`.
    pub fn track_length(id: impl Into<ItemId>, frame_count: u64, fps: f64, step_ms: u32) -> Self {
        let last_frame = frame_count.saturating_sub(1);
        let data = ItemData {
            start: time::ZERO,
            end: time::frame_to_timestamp(last_frame, fps, step_ms),
            content: String::new(),
            group: Some(TRACK_LENGTH_GROUP.to_string()),
            kind: ItemKind::Background,
            selectable: false,
            class_name: None,
        };
        Self::new(id, data)
    }
}
