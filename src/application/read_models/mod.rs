//! Read models handed to the presentation layer
pub mod refresh_snapshot;

pub use refresh_snapshot::RefreshSnapshot;
