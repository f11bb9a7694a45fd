//! Authorization-voting engine for Signet proof-of-authority.
//!
//! Every authorized signer may propose membership changes by voting in the
//! headers it produces: the coinbase field names the target account and the
//! nonce field carries the ballot direction. A proposal passes once it
//! collects a strict majority of the current signer set. The [`Snapshot`]
//! state machine folds a contiguous run of headers into the resulting
//! signer set, deterministically on every node.
//!
//! ## Module overview
//!
//! - [`snapshot`] — the `Snapshot` state machine and its header transition.
//! - [`vote`] — standing votes and per-target tallies.
//! - [`recovery`] — the signer-recovery port and its memoizing wrapper.
//! - [`error`] — engine error types.

pub mod error;
pub mod recovery;
pub mod snapshot;
pub mod vote;

pub use error::ConsensusError;
pub use recovery::{CachedRecovery, RecoveryRef, SignerRecovery};
pub use snapshot::Snapshot;
pub use vote::{Tally, Vote};
