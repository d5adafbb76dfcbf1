//! Kingdom history
//!
//! Snapshots of the kingdom are appended to a doubling log as the game is
//! played, and rendered into a trend report on demand.

pub mod log;
pub mod report;
pub mod snapshot;
pub mod store;

pub use log::{GrowableLog, INITIAL_CAPACITY};
pub use report::{build_report, HistoryReporter, NO_DATA_MESSAGE};
pub use snapshot::Snapshot;
pub use store::SnapshotStore;
