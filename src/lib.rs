//! Keeps a timeline's custom time bar in step with video playback.
//!
//! A [`ui::TimelineBridge`] exposes the page-level calls: moving the time bar,
//! fitting the visible window to an item, and starting a video sync that
//! follows a `progress` element's value.

pub mod config;
pub mod core;
pub mod dom;
pub mod error;
pub mod playback;
pub mod timeline;
pub mod ui;

pub use config::SyncConfig;
pub use error::{Missing, SyncError};
pub use ui::TimelineBridge;
