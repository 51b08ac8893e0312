//! Video progress to timeline marker synchronization.
//!
//! A sync watches the `progress` element inside a video container. Each time
//! its value changes, the timeline's custom time bar (keyed by the timeline's
//! own id) moves to `value * track_length`, where the track length is the span
//! of a reference item on the timeline.

use std::rc::Rc;

use log::{debug, error, info};

use crate::config::SyncConfig;
use crate::core::time::{Timestamp, ZERO};
use crate::dom::{CancellationHandle, Dom, ElementId, MutationRecord};
use crate::error::{Missing, SyncError};
use crate::playback::state::SyncState;
use crate::timeline::{set_marker_normalized, try_item_data, TimelineRegistry};

/// Collaborators a sync needs. Cloning shares them.
#[derive(Clone)]
pub struct SyncContext {
    pub dom: Dom,
    pub timelines: TimelineRegistry,
    pub config: Rc<SyncConfig>,
}

impl SyncContext {
    pub fn new(dom: Dom, timelines: TimelineRegistry, config: SyncConfig) -> Self {
        Self {
            dom,
            timelines,
            config: Rc::new(config),
        }
    }
}

/// Read the normalized playback position from the progress element.
///
/// `None` when the attribute is missing or not a finite number.
fn read_progress(dom: &Dom, progress: ElementId, attribute: &str) -> Option<f64> {
    let raw = dom.attribute(progress, attribute)?;
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub struct VideoTimelineSync {
    timeline_id: String,
    state: SyncState,
    handle: Option<CancellationHandle>,
}

impl VideoTimelineSync {
    /// Start syncing the video in container `video_id` to timeline `timeline_id`.
    ///
    /// The track length is the span of item `track_item_id`. If that item, the
    /// container or its progress element cannot be found the failure is logged
    /// and the sync stays [`SyncState::Uninitialized`].
    pub fn new(ctx: &SyncContext, video_id: &str, timeline_id: &str, track_item_id: &str) -> Self {
        let mut sync = Self {
            timeline_id: timeline_id.to_string(),
            state: SyncState::Uninitialized,
            handle: None,
        };

        match sync.activate(ctx, video_id, track_item_id) {
            Ok(()) => info!(
                "Syncing video {} to timeline {} (track length {}ms)",
                video_id,
                timeline_id,
                sync.track_length().unwrap_or(ZERO)
            ),
            Err(e) => error!("Error setting timeline video sync: {}", e),
        }
        sync
    }

    fn activate(
        &mut self,
        ctx: &SyncContext,
        video_id: &str,
        track_item_id: &str,
    ) -> Result<(), SyncError> {
        let reference = try_item_data(&ctx.timelines, &self.timeline_id, track_item_id)?;
        let track_length = reference.duration();

        let container = ctx
            .dom
            .get_element_by_id(video_id)
            .ok_or_else(|| Missing::Container(video_id.to_string()))?;
        let progress = ctx
            .dom
            .query_selector(container, &ctx.config.progress_selector)
            .ok_or_else(|| Missing::ProgressElement(video_id.to_string()))?;

        let callback = Self::progress_callback(ctx, &self.timeline_id, progress, track_length);
        let handle = ctx
            .dom
            .subscribe(progress, &ctx.config.progress_attribute, callback);

        self.handle = Some(handle);
        self.state = SyncState::Active { track_length };
        Ok(())
    }

    fn progress_callback(
        ctx: &SyncContext,
        timeline_id: &str,
        progress: ElementId,
        track_length: Timestamp,
    ) -> impl Fn(&[MutationRecord]) + 'static {
        let dom = ctx.dom.downgrade();
        let timelines = ctx.timelines.clone();
        let attribute = ctx.config.progress_attribute.clone();
        let timeline_id = timeline_id.to_string();

        move |records: &[MutationRecord]| {
            if !records.iter().any(|r| r.attribute_name == attribute) {
                return;
            }
            let Some(dom) = dom.upgrade() else {
                return;
            };
            let Some(position) = read_progress(&dom, progress, &attribute) else {
                return;
            };
            if !timelines.contains(&timeline_id) {
                debug!("Timeline {} gone, skipping progress update", timeline_id);
                return;
            }
            // Anchored at zero, not at the reference item's start
            set_marker_normalized(&timelines, &timeline_id, &timeline_id, ZERO, track_length, position);
        }
    }

    /// Stop observing. Safe to call any number of times.
    pub fn dispose(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
        if self.state.is_active() {
            debug!("Disposed video sync for timeline {}", self.timeline_id);
            self.state = SyncState::Disposed;
        }
    }

    pub fn timeline_id(&self) -> &str {
        &self.timeline_id
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn track_length(&self) -> Option<Timestamp> {
        self.state.track_length()
    }
}

impl Drop for VideoTimelineSync {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::{ItemData, Timeline, TimelineItem, TimelineWidget};

    struct Fixture {
        ctx: SyncContext,
        progress: ElementId,
    }

    fn fixture() -> Fixture {
        let mut timeline = Timeline::new();
        timeline.insert_item(TimelineItem::new("ref", ItemData::new(0.0, 10_000.0)));
        timeline.insert_item(TimelineItem::new("offset", ItemData::new(2_000.0, 6_000.0)));
        let timelines = TimelineRegistry::new();
        timelines.register("T1", timeline);

        let dom = Dom::new();
        let progress = dom.write(|doc| {
            let container = doc.create_element("div");
            doc.set_attribute(container, "id", "vid1");
            let progress = doc.create_element("progress");
            doc.append_child(container, progress);

            let empty = doc.create_element("div");
            doc.set_attribute(empty, "id", "no-progress");
            progress
        });

        Fixture {
            ctx: SyncContext::new(dom, timelines, SyncConfig::default()),
            progress,
        }
    }

    fn marker(ctx: &SyncContext) -> Option<Timestamp> {
        ctx.timelines.with("T1", |t| t.custom_time("T1")).flatten()
    }

    fn play_to(f: &Fixture, value: &str) {
        f.ctx.dom.set_attribute(f.progress, "value", value);
        f.ctx.dom.flush_mutations();
    }

    #[test]
    fn test_sync_moves_marker() {
        let f = fixture();
        let sync = VideoTimelineSync::new(&f.ctx, "vid1", "T1", "ref");
        assert!(sync.is_active());
        assert_eq!(sync.track_length(), Some(10_000.0));
        assert_eq!(marker(&f.ctx), None);

        play_to(&f, "0.5");
        assert_eq!(marker(&f.ctx), Some(5_000.0));
        play_to(&f, "0.25");
        assert_eq!(marker(&f.ctx), Some(2_500.0));
    }

    #[test]
    fn test_range_anchored_at_zero() {
        let f = fixture();
        let sync = VideoTimelineSync::new(&f.ctx, "vid1", "T1", "offset");
        assert_eq!(sync.track_length(), Some(4_000.0));

        play_to(&f, "0.5");
        assert_eq!(marker(&f.ctx), Some(2_000.0));
    }

    #[test]
    fn test_invalid_value_ignored() {
        let f = fixture();
        let _sync = VideoTimelineSync::new(&f.ctx, "vid1", "T1", "ref");
        play_to(&f, "0.1");
        play_to(&f, "not-a-number");
        assert_eq!(marker(&f.ctx), Some(1_000.0));

        f.ctx.dom.write(|doc| doc.remove_attribute(f.progress, "value"));
        f.ctx.dom.flush_mutations();
        assert_eq!(marker(&f.ctx), Some(1_000.0));
    }

    #[test]
    fn test_missing_reference_item() {
        let f = fixture();
        let sync = VideoTimelineSync::new(&f.ctx, "vid1", "T1", "nope");
        assert_eq!(sync.state(), SyncState::Uninitialized);
        assert_eq!(f.ctx.dom.active_subscriptions(), 0);
    }

    #[test]
    fn test_missing_container_or_progress() {
        let f = fixture();
        let sync = VideoTimelineSync::new(&f.ctx, "vid2", "T1", "ref");
        assert_eq!(sync.state(), SyncState::Uninitialized);

        let sync = VideoTimelineSync::new(&f.ctx, "no-progress", "T1", "ref");
        assert_eq!(sync.state(), SyncState::Uninitialized);
        assert_eq!(f.ctx.dom.active_subscriptions(), 0);
    }

    #[test]
    fn test_dispose_twice() {
        let f = fixture();
        let mut sync = VideoTimelineSync::new(&f.ctx, "vid1", "T1", "ref");
        assert_eq!(f.ctx.dom.active_subscriptions(), 1);

        sync.dispose();
        sync.dispose();
        assert_eq!(sync.state(), SyncState::Disposed);
        assert_eq!(f.ctx.dom.active_subscriptions(), 0);

        play_to(&f, "0.9");
        assert_eq!(marker(&f.ctx), None);
    }

    #[test]
    fn test_dispose_uninitialized_is_noop() {
        let f = fixture();
        let mut sync = VideoTimelineSync::new(&f.ctx, "vid2", "T1", "ref");
        sync.dispose();
        assert_eq!(sync.state(), SyncState::Uninitialized);
    }

    #[test]
    fn test_drop_cancels() {
        let f = fixture();
        {
            let _sync = VideoTimelineSync::new(&f.ctx, "vid1", "T1", "ref");
            assert_eq!(f.ctx.dom.active_subscriptions(), 1);
        }
        assert_eq!(f.ctx.dom.active_subscriptions(), 0);
    }

    #[test]
    fn test_timeline_removed_after_init() {
        let f = fixture();
        let _sync = VideoTimelineSync::new(&f.ctx, "vid1", "T1", "ref");
        f.ctx.timelines.unregister("T1");
        play_to(&f, "0.5");
        assert!(!f.ctx.timelines.contains("T1"));
    }
}
