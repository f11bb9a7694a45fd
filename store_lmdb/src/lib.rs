//! LMDB storage backend for the Signet engine.
//!
//! Implements the storage traits from `signet-store` using the `heed`
//! LMDB bindings, one environment with a single snapshots database.

pub mod error;
pub mod snapshot;

pub use error::LmdbError;
pub use snapshot::LmdbSnapshotStore;
