//! Data access: parsing backend exports into the typed domain model.

pub mod error;
pub mod snapshot;

pub use error::SnapshotError;
pub use snapshot::{Snapshot, SnapshotDocument};
