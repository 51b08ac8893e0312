//! Demo: plays a simulated video and keeps a timeline's time bar in step.
//!
//! Usage: `vtsync [timeline.json] [config.json]`. Without a timeline file a
//! 10 second track is generated. Log level follows `RUST_LOG` (default info).

use std::path::Path;
use std::time::Duration;

use log::{error, info, warn};

use vtsync::core::time::format_time;
use vtsync::dom::Dom;
use vtsync::timeline::{Timeline, TimelineData, TimelineItem, TimelineRegistry, TimelineWidget};
use vtsync::{SyncConfig, TimelineBridge};

const TIMELINE_ID: &str = "editor-tab-timeline";
const OUTPUT_VIDEO_ID: &str = "output-video-player";
const TRACK_LENGTH_ID: &str = "track-length-item";

const TICKS: u32 = 20;
const TICK_INTERVAL: Duration = Duration::from_millis(50);

fn load_timeline(path: Option<&str>, config: &SyncConfig) -> Timeline {
    if let Some(path) = path {
        match TimelineData::load(Path::new(path)) {
            Ok(data) => return data.into_timeline(),
            Err(e) => error!("{}, using a generated track", e),
        }
    }

    // 300 frames at 30fps
    let mut timeline = Timeline::new();
    timeline.insert_item(TimelineItem::track_length(TRACK_LENGTH_ID, 300, 30.0, config.frame_step_ms));
    timeline
}

fn build_player(dom: &Dom) -> vtsync::dom::ElementId {
    dom.write(|doc| {
        let container = doc.create_element("div");
        doc.set_attribute(container, "id", OUTPUT_VIDEO_ID);
        let video = doc.create_element("video");
        let controls = doc.create_element("div");
        let progress = doc.create_element("progress");
        doc.set_attribute(progress, "value", "0");
        doc.append_child(container, video);
        doc.append_child(container, controls);
        doc.append_child(controls, progress);
        progress
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match args.get(1) {
        Some(path) => SyncConfig::load(Path::new(path)).unwrap_or_else(|e| {
            warn!("{}, using defaults", e);
            SyncConfig::default()
        }),
        None => SyncConfig::default(),
    };

    let timelines = TimelineRegistry::new();
    timelines.register(TIMELINE_ID, load_timeline(args.first().map(String::as_str), &config));

    let dom = Dom::new();
    let progress = build_player(&dom);

    let mut bridge = TimelineBridge::new(dom.clone(), timelines.clone(), config);
    bridge.set_timeline_window_to_item_length(TIMELINE_ID, TRACK_LENGTH_ID);
    bridge.init_video_sync(OUTPUT_VIDEO_ID, TIMELINE_ID, TRACK_LENGTH_ID);

    let mut interval = tokio::time::interval(TICK_INTERVAL);
    for tick in 0..=TICKS {
        interval.tick().await;
        let position = f64::from(tick) / f64::from(TICKS);
        dom.set_attribute(progress, "value", &position.to_string());
        dom.flush_mutations();

        if let Some(Some(time)) = timelines.with(TIMELINE_ID, |t| t.custom_time(TIMELINE_ID)) {
            info!("progress {:>5.2} -> time bar {}", position, format_time(time));
        }
    }

    bridge.shutdown();
    info!("Done");
}
