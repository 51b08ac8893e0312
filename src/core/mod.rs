//! Core types shared by the timeline, document and playback modules.
//!
//! All time values are milliseconds (f64), the unit the timeline widget uses
//! for item boundaries and custom time markers.

pub mod time;

pub use time::{Timestamp, ZERO};
