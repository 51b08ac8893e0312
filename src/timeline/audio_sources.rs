//! Sound sources placed on the timeline.
//!
//! Sources are stored in video frames. On the way onto the timeline frames
//! become timestamps (rounded up to the timeline's finest step). Edits made on
//! the timeline come back as item dates and are written into the sources as
//! frames again.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::time::{self, constants::MILLIS_PER_SECOND, Timestamp};
use crate::timeline::data::{ItemRecord, TimelineData};
use crate::timeline::item::{ItemData, ItemKind, TimelineItem, TRACK_LENGTH_GROUP};
use crate::timeline::timeline::{Group, Timeline};

/// Group of foreground sources
pub const SOURCE_GROUP: &str = "1";
/// Group of ambient sources
pub const AMBIENT_GROUP: &str = "2";

const TRACK_LENGTH_CLASS: &str = "color-primary-600";

/// The parts of the video's metadata the timeline needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(rename = "FrameCount")]
    pub frame_count: u64,
    #[serde(rename = "FrameRate")]
    pub frame_rate: f64,
    /// Length in seconds
    #[serde(rename = "Duration")]
    pub duration: f64,
}

impl VideoInfo {
    pub fn duration_ms(&self) -> Timestamp {
        time::from_seconds(self.duration)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSource {
    #[serde(rename = "SourceSlugID")]
    pub slug: String,
    #[serde(rename = "SoundDescription", default)]
    pub description: String,
    #[serde(rename = "StartFrameIndex")]
    pub start_frame: i64,
    #[serde(rename = "EndFrameIndex")]
    pub end_frame: i64,
    /// Seconds, set once the source has been edited on the timeline
    #[serde(rename = "Duration", default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Fields this crate does not interpret (volume, audio path, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AudioSource {
    fn to_item(&self, video: &VideoInfo, group: &str, step_ms: u32) -> TimelineItem {
        let frame = |index: i64| u64::try_from(index).unwrap_or(0);
        let data = ItemData {
            start: time::frame_to_timestamp(frame(self.start_frame), video.frame_rate, step_ms),
            end: time::frame_to_timestamp(frame(self.end_frame), video.frame_rate, step_ms),
            content: self.description.clone(),
            group: Some(group.to_string()),
            kind: ItemKind::Range,
            selectable: true,
            class_name: None,
        };
        TimelineItem::new(self.slug.clone(), data)
    }

    /// Take start and end from an edited timeline item.
    ///
    /// Both are clamped to `[0, video duration]`; frames are truncated.
    pub fn apply_item(&mut self, item: &ItemRecord, video: &VideoInfo) {
        let start = time::parse_date_millis(&item.start);
        let end = item.end.as_ref().map_or(start, time::parse_date_millis);
        let start_ms = start.max(0.0);
        let end_ms = end.min(video.duration_ms());

        let to_frame = |ms: Timestamp| ((ms / MILLIS_PER_SECOND) * video.frame_rate).trunc() as i64;
        self.start_frame = to_frame(start_ms);
        self.end_frame = to_frame(end_ms);
        self.duration = Some((end_ms - start_ms) / MILLIS_PER_SECOND);
        debug!(
            "Source {} moved to frames {}..{}",
            self.slug, self.start_frame, self.end_frame
        );
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioSources {
    #[serde(rename = "AudioSources", default)]
    pub sources: Vec<AudioSource>,
    #[serde(rename = "AmbientAudioSources", default)]
    pub ambient: Vec<AudioSource>,
}

impl AudioSources {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn len(&self) -> usize {
        self.sources.len() + self.ambient.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Foreground sources first, then ambient ones
    pub fn find(&self, slug: &str) -> Option<&AudioSource> {
        self.sources
            .iter()
            .chain(self.ambient.iter())
            .find(|s| s.slug == slug)
    }

    /// Lay the sources out on a timeline together with the track length
    /// background item `track_item_id`.
    pub fn to_timeline(&self, video: &VideoInfo, track_item_id: &str, step_ms: u32) -> Timeline {
        let mut timeline = Timeline::new();
        timeline.groups = [TRACK_LENGTH_GROUP, SOURCE_GROUP, AMBIENT_GROUP]
            .iter()
            .map(|id| Group {
                id: id.to_string(),
                content: String::new(),
            })
            .collect();

        let mut track =
            TimelineItem::track_length(track_item_id, video.frame_count, video.frame_rate, step_ms);
        if let Some(data) = track.data.as_mut() {
            data.class_name = Some(TRACK_LENGTH_CLASS.to_string());
        }
        timeline.insert_item(track);

        for source in &self.sources {
            timeline.insert_item(source.to_item(video, SOURCE_GROUP, step_ms));
        }
        for source in &self.ambient {
            timeline.insert_item(source.to_item(video, AMBIENT_GROUP, step_ms));
        }
        timeline
    }

    /// Write timeline edits back into the sources, matching items by slug.
    /// Sources without an item are left alone.
    pub fn apply_timeline_data(&mut self, data: &TimelineData, video: &VideoInfo) {
        for source in self.sources.iter_mut().chain(self.ambient.iter_mut()) {
            if let Some(item) = data.items.iter().find(|i| i.item_id() == source.slug) {
                source.apply_item(item, video);
            }
        }
    }
}
