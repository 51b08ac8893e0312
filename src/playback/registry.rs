//! One video sync per timeline.

use std::collections::HashMap;

use log::debug;

use crate::playback::sync::{SyncContext, VideoTimelineSync};

/// Active syncs keyed by timeline id.
///
/// The map is created on first use. Re-initializing a timeline disposes the
/// previous sync before the new one subscribes, so a timeline never has two
/// observers.
#[derive(Default)]
pub struct SyncRegistry {
    syncs: Option<HashMap<String, VideoTimelineSync>>,
}

impl SyncRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the sync for `timeline_id` with a new one.
    ///
    /// Construction failures are logged by [`VideoTimelineSync::new`]; the
    /// failed sync is still stored so a later call replaces it.
    pub fn init_sync(
        &mut self,
        ctx: &SyncContext,
        video_id: &str,
        timeline_id: &str,
        track_item_id: &str,
    ) -> &VideoTimelineSync {
        let syncs = self.syncs.get_or_insert_with(|| {
            debug!("Creating sync registry");
            HashMap::new()
        });

        if let Some(mut previous) = syncs.remove(timeline_id) {
            previous.dispose();
        }

        let sync = VideoTimelineSync::new(ctx, video_id, timeline_id, track_item_id);
        syncs.entry(timeline_id.to_string()).or_insert(sync)
    }

    pub fn get(&self, timeline_id: &str) -> Option<&VideoTimelineSync> {
        self.syncs.as_ref()?.get(timeline_id)
    }

    /// Whether `init_sync` has been called at least once
    pub fn is_initialized(&self) -> bool {
        self.syncs.is_some()
    }

    pub fn len(&self) -> usize {
        self.syncs.as_ref().map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn active_count(&self) -> usize {
        self.syncs
            .iter()
            .flat_map(|syncs| syncs.values())
            .filter(|sync| sync.is_active())
            .count()
    }

    /// Dispose every sync. Entries stay, in the disposed state.
    pub fn dispose_all(&mut self) {
        for sync in self.syncs.iter_mut().flat_map(|syncs| syncs.values_mut()) {
            sync.dispose();
        }
    }
}
