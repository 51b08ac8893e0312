//! Page-facing glue.

pub mod bridge;

pub use bridge::TimelineBridge;
