pub mod registry;
pub mod state;
pub mod sync;

pub use registry::SyncRegistry;
pub use state::SyncState;
pub use sync::{SyncContext, VideoTimelineSync};
