//! tkt-persist
//!
//! The reconciliation state of one station and its durable snapshot.
//!
//! The snapshot is a single JSON record replaced in full on every save
//! (write to a sibling temp file, fsync, rename). A missing or unreadable record
//! loads as an empty morning shift.

mod snapshot;
mod state;

pub use snapshot::{SnapshotStore, SNAPSHOT_SCHEMA_VERSION};
pub use state::ReconciliationState;
