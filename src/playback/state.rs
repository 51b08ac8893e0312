//! Sync lifecycle state machine.

use crate::core::time::Timestamp;

/// Lifecycle of a [`crate::playback::VideoTimelineSync`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncState {
    /// Construction did not complete; never observed anything
    Uninitialized,
    /// Observing progress changes over a track of `track_length` milliseconds
    Active { track_length: Timestamp },
    /// Observation cancelled
    Disposed,
}

impl SyncState {
    pub fn is_active(&self) -> bool {
        matches!(self, SyncState::Active { .. })
    }

    pub fn is_disposed(&self) -> bool {
        matches!(self, SyncState::Disposed)
    }

    /// Track length while active
    pub fn track_length(&self) -> Option<Timestamp> {
        match self {
            SyncState::Active { track_length } => Some(*track_length),
            _ => None,
        }
    }
}
