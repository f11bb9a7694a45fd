//! Signer recovery port.
//!
//! Recovering the producer address from a header's seal is cryptographic
//! work that lives outside this crate. The engine consumes it through the
//! [`SignerRecovery`] trait so tests can inject deterministic stubs, and
//! wraps real implementations in [`CachedRecovery`] because the same
//! headers are recovered repeatedly while voting history is replayed.

use crate::ConsensusError;
use lru::LruCache;
use signet_types::{Address, BlockHash, Header};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

/// Resolves the producing address from a header's seal bytes.
pub trait SignerRecovery: Send + Sync {
    fn recover(&self, header: &Header) -> Result<Address, ConsensusError>;
}

/// Shared handle to a recovery implementation.
pub type RecoveryRef = Arc<dyn SignerRecovery>;

/// Number of recovered signatures kept in memory.
const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Bounded memoization of signer recovery, keyed by header hash.
///
/// A miss simply recomputes, so the eviction order affects speed only,
/// never correctness.
pub struct CachedRecovery<R> {
    inner: R,
    cache: Mutex<LruCache<BlockHash, Address>>,
}

impl<R: SignerRecovery> CachedRecovery<R> {
    pub fn new(inner: R, capacity: NonZeroUsize) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn with_default_capacity(inner: R) -> Self {
        let capacity = NonZeroUsize::new(DEFAULT_CACHE_CAPACITY).expect("capacity is non-zero");
        Self::new(inner, capacity)
    }
}

impl<R: SignerRecovery> SignerRecovery for CachedRecovery<R> {
    fn recover(&self, header: &Header) -> Result<Address, ConsensusError> {
        if let Some(addr) = self.cache.lock().unwrap().get(&header.hash) {
            return Ok(*addr);
        }
        let addr = self.inner.recover(header)?;
        self.cache.lock().unwrap().put(header.hash, addr);
        Ok(addr)
    }
}
