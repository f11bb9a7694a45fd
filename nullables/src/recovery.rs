//! Nullable signer recovery — resolves producers from a registered map.

use signet_consensus::{ConsensusError, SignerRecovery};
use signet_types::{Address, BlockHash, Header};
use std::collections::HashMap;
use std::sync::Mutex;

/// A deterministic stand-in for cryptographic signer recovery.
///
/// Headers are resolved from a pre-registered header-hash to address map;
/// unregistered headers fail the same way an unrecoverable seal would.
pub struct NullRecovery {
    producers: Mutex<HashMap<BlockHash, Address>>,
}

impl NullRecovery {
    pub fn new() -> Self {
        Self {
            producers: Mutex::new(HashMap::new()),
        }
    }

    /// Register the producer of the given header.
    pub fn register(&self, hash: BlockHash, producer: Address) {
        self.producers.lock().unwrap().insert(hash, producer);
    }
}

impl Default for NullRecovery {
    fn default() -> Self {
        Self::new()
    }
}

impl SignerRecovery for NullRecovery {
    fn recover(&self, header: &Header) -> Result<Address, ConsensusError> {
        self.producers
            .lock()
            .unwrap()
            .get(&header.hash)
            .copied()
            .ok_or_else(|| {
                ConsensusError::Recovery(format!("no producer registered for {}", header.hash))
            })
    }
}
