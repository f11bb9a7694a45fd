//! Engine parameters.

use serde::{Deserialize, Serialize};

/// Tunable parameters of the voting engine.
///
/// These are process configuration, not chain state: they are never
/// serialized with a snapshot and are re-attached after a snapshot is
/// loaded from storage.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct EngineParams {
    /// Checkpoint interval in blocks. At every multiple of this height all
    /// pending votes are discarded and the header restates the signer list.
    /// Must be non-zero; the engine rejects a zero interval at snapshot
    /// construction.
    pub epoch_length: u64,

    /// How often (in blocks) callers persist snapshots to storage for fast
    /// recovery. Advisory for the chain processor; the transition itself
    /// does not consume it.
    pub persist_interval: u64,
}

impl EngineParams {
    pub const DEFAULT_EPOCH_LENGTH: u64 = 30_000;
    pub const DEFAULT_PERSIST_INTERVAL: u64 = 1_024;
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            epoch_length: Self::DEFAULT_EPOCH_LENGTH,
            persist_interval: Self::DEFAULT_PERSIST_INTERVAL,
        }
    }
}
