pub mod audio_sources;
pub mod data;
pub mod item;
pub mod lookup;
pub mod registry;
pub mod time_bar;
#[allow(clippy::module_inception)]
pub mod timeline;
pub mod widget;
pub mod window;

pub use audio_sources::{AudioSource, AudioSources, VideoInfo};
pub use data::{LoadError, TimelineData};
pub use item::{ItemData, ItemId, ItemKind, TimelineItem};
pub use lookup::{get_item_data, try_item_data};
pub use registry::TimelineRegistry;
pub use time_bar::{set_marker, set_marker_normalized, try_set_marker};
pub use timeline::{Group, Timeline};
pub use widget::{TimelineWidget, WidgetError, Window, WindowOptions};
pub use window::fit_window_to_item;
