//! End-to-end flow against the nullable collaborators: vote a signer in,
//! persist the snapshot, reload it, and keep applying headers.

use signet_consensus::{CachedRecovery, Snapshot};
use signet_nullables::{NullRecovery, NullSnapshotStore};
use signet_types::{Address, BlockHash, EngineParams, Header, Nonce};
use std::sync::Arc;

fn addr(byte: u8) -> Address {
    Address::new([byte; 20])
}

fn header(number: u64, coinbase: Address, nonce: Nonce) -> Header {
    let mut hash = [0u8; 32];
    hash[..8].copy_from_slice(&number.to_be_bytes());
    Header {
        number,
        hash: BlockHash::new(hash),
        coinbase,
        nonce,
        seal: Vec::new(),
    }
}

#[test]
fn vote_persist_reload_continue() {
    signet_utils::init_test_tracing();
    let (a, b, c, d) = (addr(1), addr(2), addr(3), addr(4));

    let recovery = NullRecovery::new();
    let run = [
        header(1, d, Nonce::AUTHORIZE),
        header(2, d, Nonce::AUTHORIZE),
    ];
    recovery.register(run[0].hash, a);
    recovery.register(run[1].hash, b);
    let cont = header(3, c, Nonce::AUTHORIZE); // meaningless filler vote
    recovery.register(cont.hash, c);

    let recovery: Arc<CachedRecovery<NullRecovery>> =
        Arc::new(CachedRecovery::with_default_capacity(recovery));

    let genesis = Snapshot::new(
        EngineParams::default(),
        recovery.clone(),
        0,
        BlockHash::ZERO,
        &[a, b, c],
    );

    // Two of three signers vote D in.
    let voted = genesis.apply(&run).unwrap();
    assert_eq!(voted.signers(), vec![a, b, c, d]);
    assert!(voted.votes().is_empty());

    // Persist, reload with re-injected context, compare.
    let store = NullSnapshotStore::new();
    voted.persist(&store).unwrap();
    let loaded = Snapshot::load(
        &store,
        EngineParams::default(),
        recovery.clone(),
        &voted.hash(),
    )
    .unwrap();
    assert_eq!(loaded, voted);
    assert_eq!(loaded.to_bytes().unwrap(), voted.to_bytes().unwrap());

    // The reloaded snapshot keeps applying headers.
    let next = loaded.apply(std::slice::from_ref(&cont)).unwrap();
    assert_eq!(next.number(), 3);
    assert_eq!(next.hash(), cont.hash);
    assert_eq!(next.signers(), vec![a, b, c, d]);
}

#[test]
fn loading_a_missing_snapshot_surfaces_not_found() {
    signet_utils::init_test_tracing();
    let store = NullSnapshotStore::new();
    let recovery = Arc::new(NullRecovery::new());
    let err = Snapshot::load(
        &store,
        EngineParams::default(),
        recovery,
        &BlockHash::new([9u8; 32]),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        signet_consensus::ConsensusError::Store(signet_store::StoreError::NotFound(_))
    ));
}
