//! Nullable snapshot store — thread-safe in-memory storage for testing.

use signet_store::{SnapshotStore, StoreError};
use signet_types::BlockHash;
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory snapshot store for testing.
pub struct NullSnapshotStore {
    snapshots: Mutex<HashMap<[u8; 32], Vec<u8>>>,
}

impl NullSnapshotStore {
    pub fn new() -> Self {
        Self {
            snapshots: Mutex::new(HashMap::new()),
        }
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.lock().unwrap().is_empty()
    }
}

impl Default for NullSnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for NullSnapshotStore {
    fn get_snapshot(&self, hash: &BlockHash) -> Result<Vec<u8>, StoreError> {
        self.snapshots
            .lock()
            .unwrap()
            .get(hash.as_bytes())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("snapshot {hash}")))
    }

    fn put_snapshot(&self, hash: &BlockHash, blob: &[u8]) -> Result<(), StoreError> {
        self.snapshots
            .lock()
            .unwrap()
            .insert(*hash.as_bytes(), blob.to_vec());
        Ok(())
    }
}
