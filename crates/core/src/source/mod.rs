//! Places a raw batch can be obtained from.

/// HTTP retrieval from the dashboard API.
pub mod http;
/// Snapshot files written by the fetcher.
pub mod snapshot;

pub use http::HttpSource;
pub use snapshot::{SnapshotEntry, SnapshotStore};
