//! Record stores, derived views, pinned items and the versioned tracker.

pub mod filtered;
pub mod pinned;
pub mod state;
pub mod unique_list;
pub mod versioned;

pub use filtered::{Comparator, FilteredView, Predicate};
pub use pinned::PinnedCoordinator;
pub use state::{PinnedItems, TrackerState};
pub use unique_list::UniqueList;
pub use versioned::VersionedTracker;
