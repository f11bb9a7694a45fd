//! Snapshot storage trait.

use crate::StoreError;
use signet_types::BlockHash;

/// Keyed persistence of serialized voting snapshots.
///
/// The engine periodically stores a snapshot blob keyed by the hash of the
/// block the snapshot reflects, so a restarting node can resume from the
/// nearest persisted state instead of replaying from genesis. Blobs are
/// opaque to the store; the engine owns the codec.
pub trait SnapshotStore {
    /// Retrieve a snapshot blob by block hash.
    fn get_snapshot(&self, hash: &BlockHash) -> Result<Vec<u8>, StoreError>;

    /// Store a snapshot blob under the given block hash.
    fn put_snapshot(&self, hash: &BlockHash, blob: &[u8]) -> Result<(), StoreError>;
}
