//! In-process stand-in for the page: elements, attributes and attribute
//! change subscriptions.

pub mod document;
pub mod observer;

pub use document::{Document, Dom, ElementId, WeakDom};
pub use observer::{CancellationHandle, MutationRecord};
