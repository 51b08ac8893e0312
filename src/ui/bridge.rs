//! Entry points called from the page.
//!
//! Every call is side-effect only. Failures are logged and turned into
//! no-ops; nothing is returned to the caller.

use log::debug;

use crate::config::SyncConfig;
use crate::core::time::Timestamp;
use crate::dom::Dom;
use crate::playback::{SyncContext, SyncRegistry};
use crate::timeline::{self, TimelineRegistry};

/// Owns the sync registry and shares the document and timelines with it.
pub struct TimelineBridge {
    ctx: SyncContext,
    syncs: SyncRegistry,
}

impl TimelineBridge {
    pub fn new(dom: Dom, timelines: TimelineRegistry, config: SyncConfig) -> Self {
        Self {
            ctx: SyncContext::new(dom, timelines, config),
            syncs: SyncRegistry::new(),
        }
    }

    /// Put the time bar of `timeline_id` (keyed by the timeline id) at `time`.
    pub fn set_time_bar_direct(&self, timeline_id: &str, time: Timestamp) {
        timeline::set_marker(&self.ctx.timelines, timeline_id, timeline_id, time);
    }

    /// Put the time bar at `position` within `[start, end]`.
    pub fn set_time_bar_normalized(
        &self,
        timeline_id: &str,
        start: Timestamp,
        end: Timestamp,
        position: f64,
    ) {
        timeline::set_marker_normalized(
            &self.ctx.timelines,
            timeline_id,
            timeline_id,
            start,
            end,
            position,
        );
    }

    /// (Re)start syncing the video in `video_id` to `timeline_id`.
    pub fn init_video_sync(&mut self, video_id: &str, timeline_id: &str, track_length_item_id: &str) {
        debug!("initVideoSync({}, {}, {})", video_id, timeline_id, track_length_item_id);
        self.syncs
            .init_sync(&self.ctx, video_id, timeline_id, track_length_item_id);
    }

    /// Fit the visible window of `timeline_id` to the span of `item_id`.
    pub fn set_timeline_window_to_item_length(&self, timeline_id: &str, item_id: &str) {
        timeline::fit_window_to_item(&self.ctx.timelines, &self.ctx.config, timeline_id, item_id);
    }

    pub fn dom(&self) -> &Dom {
        &self.ctx.dom
    }

    pub fn timelines(&self) -> &TimelineRegistry {
        &self.ctx.timelines
    }

    pub fn config(&self) -> &SyncConfig {
        &self.ctx.config
    }

    pub fn syncs(&self) -> &SyncRegistry {
        &self.syncs
    }

    /// Dispose every sync
    pub fn shutdown(&mut self) {
        self.syncs.dispose_all();
    }
}
