//! LMDB implementation of SnapshotStore.

use std::path::Path;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};
use tracing::debug;

use signet_store::{SnapshotStore, StoreError};
use signet_types::BlockHash;

use crate::LmdbError;

/// Default map size: 1 GiB, plenty for snapshot blobs.
pub const DEFAULT_MAP_SIZE: usize = 1 << 30;

pub struct LmdbSnapshotStore {
    env: Env,
    snapshots_db: Database<Bytes, Bytes>,
}

impl LmdbSnapshotStore {
    /// Open or create an LMDB environment at the given path.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;
        // Safety contract of heed: the environment path must not be opened
        // concurrently by another process in this address space.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(1)
                .open(path)?
        };
        let mut wtxn = env.write_txn()?;
        let snapshots_db = env.create_database(&mut wtxn, Some("snapshots"))?;
        wtxn.commit()?;
        debug!(path = %path.display(), "opened snapshot database");
        Ok(Self { env, snapshots_db })
    }

    pub fn open_default(path: &Path) -> Result<Self, LmdbError> {
        Self::open(path, DEFAULT_MAP_SIZE)
    }
}

impl SnapshotStore for LmdbSnapshotStore {
    fn get_snapshot(&self, hash: &BlockHash) -> Result<Vec<u8>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let blob = self
            .snapshots_db
            .get(&rtxn, hash.as_bytes())
            .map_err(LmdbError::from)?
            .ok_or_else(|| LmdbError::NotFound(format!("snapshot {hash}")))?;
        Ok(blob.to_vec())
    }

    fn put_snapshot(&self, hash: &BlockHash, blob: &[u8]) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.snapshots_db
            .put(&mut wtxn, hash.as_bytes(), blob)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        debug!(%hash, bytes = blob.len(), "stored snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_temp() -> (tempfile::TempDir, LmdbSnapshotStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LmdbSnapshotStore::open(dir.path(), 16 * 1024 * 1024).unwrap();
        (dir, store)
    }

    #[test]
    fn put_then_get_roundtrips() {
        let (_dir, store) = open_temp();
        let hash = BlockHash::new([42u8; 32]);
        store.put_snapshot(&hash, b"snapshot blob").unwrap();
        assert_eq!(store.get_snapshot(&hash).unwrap(), b"snapshot blob");
    }

    #[test]
    fn missing_snapshot_is_not_found() {
        let (_dir, store) = open_temp();
        let err = store.get_snapshot(&BlockHash::new([1u8; 32])).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn put_overwrites_existing_blob() {
        let (_dir, store) = open_temp();
        let hash = BlockHash::new([42u8; 32]);
        store.put_snapshot(&hash, b"old").unwrap();
        store.put_snapshot(&hash, b"new").unwrap();
        assert_eq!(store.get_snapshot(&hash).unwrap(), b"new");
    }

    #[test]
    fn blobs_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let hash = BlockHash::new([7u8; 32]);
        {
            let store = LmdbSnapshotStore::open(dir.path(), 16 * 1024 * 1024).unwrap();
            store.put_snapshot(&hash, b"persisted").unwrap();
        }
        let store = LmdbSnapshotStore::open(dir.path(), 16 * 1024 * 1024).unwrap();
        assert_eq!(store.get_snapshot(&hash).unwrap(), b"persisted");
    }
}
