use vtsync::core::time::Timestamp;
use vtsync::dom::{Dom, ElementId};
use vtsync::playback::SyncState;
use vtsync::timeline::{ItemData, Timeline, TimelineData, TimelineItem, TimelineRegistry, TimelineWidget, Window};
use vtsync::{SyncConfig, TimelineBridge};

fn player(dom: &Dom, container_id: &str) -> ElementId {
    dom.write(|doc| {
        let container = doc.create_element("div");
        doc.set_attribute(container, "id", container_id);
        let progress = doc.create_element("progress");
        doc.append_child(container, progress);
        progress
    })
}

fn setup() -> (TimelineBridge, ElementId) {
    let mut timeline = Timeline::new();
    timeline.insert_item(TimelineItem::new("ref", ItemData::new(0.0, 10_000.0)));
    timeline.insert_item(TimelineItem::new("itemA", ItemData::new(100.0, 200.0)));

    let timelines = TimelineRegistry::new();
    timelines.register("T1", timeline);

    let dom = Dom::new();
    let progress = player(&dom, "vid1");
    (TimelineBridge::new(dom, timelines, SyncConfig::default()), progress)
}

fn marker(bridge: &TimelineBridge, timeline_id: &str) -> Option<Timestamp> {
    bridge
        .timelines()
        .with(timeline_id, |t| t.custom_time(timeline_id))
        .flatten()
}

fn play(bridge: &TimelineBridge, progress: ElementId, value: &str) {
    bridge.dom().set_attribute(progress, "value", value);
    bridge.dom().flush_mutations();
}

#[test]
fn progress_drives_time_bar() {
    let (mut bridge, progress) = setup();
    bridge.init_video_sync("vid1", "T1", "ref");

    let sync = bridge.syncs().get("T1").unwrap();
    assert_eq!(sync.state(), SyncState::Active { track_length: 10_000.0 });

    play(&bridge, progress, "0.5");
    assert_eq!(marker(&bridge, "T1"), Some(5_000.0));

    play(&bridge, progress, "1");
    assert_eq!(marker(&bridge, "T1"), Some(10_000.0));
}

#[test]
fn batched_changes_settle_on_latest_value() {
    let (mut bridge, progress) = setup();
    bridge.init_video_sync("vid1", "T1", "ref");

    bridge.dom().set_attribute(progress, "value", "0.1");
    bridge.dom().set_attribute(progress, "value", "0.2");
    bridge.dom().set_attribute(progress, "value", "0.3");
    assert_eq!(bridge.dom().flush_mutations(), 1);
    assert_eq!(marker(&bridge, "T1"), Some(3_000.0));
}

#[test]
fn reinit_keeps_single_subscription() {
    let (mut bridge, progress) = setup();
    bridge.init_video_sync("vid1", "T1", "ref");
    bridge.init_video_sync("vid1", "T1", "ref");

    assert_eq!(bridge.dom().active_subscriptions(), 1);
    assert_eq!(bridge.syncs().len(), 1);

    play(&bridge, progress, "0.25");
    assert_eq!(marker(&bridge, "T1"), Some(2_500.0));
}

#[test]
fn time_bar_upsert_and_sync_share_one_marker() {
    let (mut bridge, progress) = setup();
    bridge.set_time_bar_direct("T1", 42.0);
    bridge.init_video_sync("vid1", "T1", "ref");
    play(&bridge, progress, "0.75");

    assert_eq!(marker(&bridge, "T1"), Some(7_500.0));
}

#[test]
fn fit_window_pads_item_end() {
    let (bridge, _) = setup();
    bridge.set_timeline_window_to_item_length("T1", "itemA");

    let window = bridge.timelines().with("T1", |t| t.window()).flatten();
    assert_eq!(window, Some(Window { start: 100.0, end: 220.0 }));
}

#[test]
fn missing_pieces_degrade_to_noops() {
    let (mut bridge, progress) = setup();
    bridge.init_video_sync("vid1", "T1", "missing-item");
    bridge.init_video_sync("vid2", "T1", "ref");
    bridge.init_video_sync("vid1", "tlX", "ref");
    bridge.set_time_bar_normalized("tlX", 0.0, 1.0, 0.5);
    bridge.set_timeline_window_to_item_length("T1", "missing-item");

    assert_eq!(bridge.syncs().active_count(), 0);
    assert_eq!(bridge.dom().active_subscriptions(), 0);

    play(&bridge, progress, "0.5");
    assert_eq!(marker(&bridge, "T1"), None);
}

#[test]
fn shutdown_twice_stops_updates() {
    let (mut bridge, progress) = setup();
    bridge.init_video_sync("vid1", "T1", "ref");
    play(&bridge, progress, "0.1");

    bridge.shutdown();
    bridge.shutdown();
    assert_eq!(bridge.dom().active_subscriptions(), 0);

    play(&bridge, progress, "0.9");
    assert_eq!(marker(&bridge, "T1"), Some(1_000.0));
}

#[test]
fn loaded_timeline_data_drives_sync() {
    let data = TimelineData::from_json_str(
        r#"{
            "groups": [{ "id": "track-length", "content": "" }],
            "items": [{
                "id": "track-length-item",
                "group": "track-length",
                "type": "background",
                "selectable": false,
                "start": 0,
                "end": 8000
            }]
        }"#,
    )
    .unwrap();

    let timelines = TimelineRegistry::new();
    timelines.register("editor-tab-timeline", data.into_timeline());
    let dom = Dom::new();
    let progress = player(&dom, "output-video-player");

    let mut bridge = TimelineBridge::new(dom, timelines, SyncConfig::default());
    bridge.init_video_sync("output-video-player", "editor-tab-timeline", "track-length-item");
    play(&bridge, progress, "0.5");

    assert_eq!(marker(&bridge, "editor-tab-timeline"), Some(4_000.0));
}
