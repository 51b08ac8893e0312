//! In-memory timeline widget.
//!
//! Holds items, custom time bars and the visible window. Behaves like the
//! browser widget where the sync glue can observe it: moving an unknown
//! custom time bar fails, adding a duplicate one fails, and a window must
//! have `start < end`.

use std::collections::HashMap;

use log::trace;

use crate::core::time::Timestamp;
use crate::timeline::item::{ItemData, ItemId, TimelineItem};
use crate::timeline::widget::{TimelineWidget, WidgetError, Window, WindowOptions};

/// Item group (a row on the timeline)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    pub groups: Vec<Group>,
    items: Option<HashMap<ItemId, TimelineItem>>,
    custom_times: HashMap<String, Timestamp>,
    window: Option<Window>,
    last_window_animated: bool,
}

impl Timeline {
    /// Create a timeline with an empty item collection.
    pub fn new() -> Self {
        Self {
            items: Some(HashMap::new()),
            ..Default::default()
        }
    }

    /// Create a timeline whose item collection has not been attached yet.
    pub fn without_items() -> Self {
        Self::default()
    }

    /// Insert an item, returning the one it replaced.
    pub fn insert_item(&mut self, item: TimelineItem) -> Option<TimelineItem> {
        self.items
            .get_or_insert_with(HashMap::new)
            .insert(item.id.clone(), item)
    }

    pub fn remove_item(&mut self, item_id: &str) -> Option<TimelineItem> {
        self.items.as_mut()?.remove(item_id)
    }

    pub fn item(&self, item_id: &str) -> Option<&TimelineItem> {
        self.items.as_ref()?.get(item_id)
    }

    /// Data records of all items overlapping `[start, end]`, sorted by start.
    pub fn items_in_range(&self, start: Timestamp, end: Timestamp) -> Vec<&ItemData> {
        let mut found: Vec<&ItemData> = self
            .items
            .iter()
            .flat_map(|items| items.values())
            .filter_map(|item| item.data.as_ref())
            .filter(|data| data.start <= end && data.end >= start)
            .collect();
        found.sort_by(|a, b| a.start.total_cmp(&b.start));
        found
    }

    /// End of the last item, or 0 for an empty timeline.
    pub fn duration(&self) -> Timestamp {
        self.items
            .iter()
            .flat_map(|items| items.values())
            .filter_map(|item| item.data.as_ref())
            .map(|data| data.end)
            .fold(0.0, f64::max)
    }

    pub fn custom_time_count(&self) -> usize {
        self.custom_times.len()
    }

    /// Whether the last `set_window` call asked for animation
    pub fn last_window_animated(&self) -> bool {
        self.last_window_animated
    }
}

impl TimelineWidget for Timeline {
    fn custom_time(&self, key: &str) -> Option<Timestamp> {
        self.custom_times.get(key).copied()
    }

    fn set_custom_time(&mut self, time: Timestamp, key: &str) -> Result<(), WidgetError> {
        match self.custom_times.get_mut(key) {
            Some(current) => {
                *current = time;
                Ok(())
            }
            None => Err(WidgetError::UnknownCustomTime(key.to_string())),
        }
    }

    fn add_custom_time(&mut self, time: Timestamp, key: &str) -> Result<(), WidgetError> {
        if self.custom_times.contains_key(key) {
            return Err(WidgetError::DuplicateCustomTime(key.to_string()));
        }
        self.custom_times.insert(key.to_string(), time);
        Ok(())
    }

    fn items(&self) -> Option<&HashMap<ItemId, TimelineItem>> {
        self.items.as_ref()
    }

    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    fn set_window(
        &mut self,
        start: Timestamp,
        end: Timestamp,
        options: WindowOptions,
    ) -> Result<(), WidgetError> {
        // Negated so NaN bounds are rejected too
        if !(start < end) {
            return Err(WidgetError::InvalidWindow { start, end });
        }
        trace!("window [{}, {}] animation={}", start, end, options.animation);
        self.window = Some(Window { start, end });
        self.last_window_animated = options.animation;
        Ok(())
    }

    fn window(&self) -> Option<Window> {
        self.window
    }
}
