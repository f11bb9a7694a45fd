//! Nullable infrastructure for deterministic testing.
//!
//! In-memory stand-ins for the engine's external collaborators: the
//! snapshot store and the signer-recovery port.

pub mod recovery;
pub mod store;

pub use recovery::NullRecovery;
pub use store::NullSnapshotStore;
