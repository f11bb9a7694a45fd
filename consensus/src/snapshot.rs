//! The authorization-voting snapshot and its header transition.
//!
//! A `Snapshot` is the full voting state at one block: the authorized
//! signer set, the rotation window of recent producers, the standing votes
//! and their tallies. Applying a contiguous run of headers yields a new
//! snapshot; the input is never mutated, so a failed run leaves the caller
//! exactly where it started.

use crate::error::ConsensusError;
use crate::recovery::RecoveryRef;
use crate::vote::{Tally, Vote};
use serde::{Deserialize, Serialize};
use signet_store::SnapshotStore;
use signet_types::{Address, BlockHash, EngineParams, Header};
use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How often `apply` reports progress on long reconstruction runs.
const PROGRESS_LOG_INTERVAL: Duration = Duration::from_secs(8);

/// The state of the authorization voting at a given block.
///
/// Ordered collections keep iteration and the serialized blob
/// deterministic; honest nodes must produce byte-identical snapshots from
/// the same header sequence.
#[derive(Clone)]
pub struct Snapshot {
    /// Engine parameters; re-attached after a load, never serialized.
    params: EngineParams,
    /// Injected signer-recovery port; never serialized.
    recovery: RecoveryRef,

    /// Block number the snapshot reflects.
    number: u64,
    /// Hash of the block the snapshot reflects.
    hash: BlockHash,
    /// Set of authorized signers at this moment.
    signers: BTreeSet<Address>,
    /// Recent block producers, for spam protection.
    recents: BTreeMap<u64, Address>,
    /// Standing votes, in chronological order.
    votes: Vec<Vote>,
    /// Current vote tally, kept consistent with `votes`.
    tally: BTreeMap<Address, Tally>,
}

/// The persisted portion of a snapshot.
#[derive(Serialize, Deserialize)]
struct SnapshotData {
    number: u64,
    hash: BlockHash,
    signers: BTreeSet<Address>,
    recents: BTreeMap<u64, Address>,
    votes: Vec<Vote>,
    tally: BTreeMap<Address, Tally>,
}

impl Snapshot {
    /// Create a genesis snapshot from a known initial signer set.
    ///
    /// Does not initialize the rotation window, so only ever use it for
    /// the genesis block.
    ///
    /// # Panics
    /// Panics if `params.epoch_length` is zero; the checkpoint schedule
    /// needs a non-zero interval.
    pub fn new(
        params: EngineParams,
        recovery: RecoveryRef,
        number: u64,
        hash: BlockHash,
        signers: &[Address],
    ) -> Self {
        assert_ne!(params.epoch_length, 0, "epoch length must be non-zero");
        Self {
            params,
            recovery,
            number,
            hash,
            signers: signers.iter().copied().collect(),
            recents: BTreeMap::new(),
            votes: Vec::new(),
            tally: BTreeMap::new(),
        }
    }

    /// Load a previously persisted snapshot, re-attaching the parameters
    /// and recovery port from process context.
    pub fn load(
        store: &dyn SnapshotStore,
        params: EngineParams,
        recovery: RecoveryRef,
        hash: &BlockHash,
    ) -> Result<Self, ConsensusError> {
        let blob = store.get_snapshot(hash)?;
        Self::from_bytes(params, recovery, &blob)
    }

    /// Persist this snapshot under its block hash.
    pub fn persist(&self, store: &dyn SnapshotStore) -> Result<(), ConsensusError> {
        let blob = self.to_bytes()?;
        store.put_snapshot(&self.hash, &blob)?;
        Ok(())
    }

    /// Serialize the persisted fields. Parameters and the recovery port
    /// are process context and stay out of the blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConsensusError> {
        let data = SnapshotData {
            number: self.number,
            hash: self.hash,
            signers: self.signers.clone(),
            recents: self.recents.clone(),
            votes: self.votes.clone(),
            tally: self.tally.clone(),
        };
        bincode::serialize(&data).map_err(|e| ConsensusError::Serialization(e.to_string()))
    }

    /// Rebuild a snapshot from a persisted blob.
    ///
    /// # Panics
    /// Panics if `params.epoch_length` is zero, as [`Snapshot::new`] does.
    pub fn from_bytes(
        params: EngineParams,
        recovery: RecoveryRef,
        blob: &[u8],
    ) -> Result<Self, ConsensusError> {
        assert_ne!(params.epoch_length, 0, "epoch length must be non-zero");
        let data: SnapshotData =
            bincode::deserialize(blob).map_err(|e| ConsensusError::Serialization(e.to_string()))?;
        Ok(Self {
            params,
            recovery,
            number: data.number,
            hash: data.hash,
            signers: data.signers,
            recents: data.recents,
            votes: data.votes,
            tally: data.tally,
        })
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn hash(&self) -> BlockHash {
        self.hash
    }

    pub fn is_signer(&self, address: &Address) -> bool {
        self.signers.contains(address)
    }

    /// Standing votes in chronological order.
    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    /// Current tallies by target address.
    pub fn tallies(&self) -> &BTreeMap<Address, Tally> {
        &self.tally
    }

    /// Recent producers by block number.
    pub fn recents(&self) -> &BTreeMap<u64, Address> {
        &self.recents
    }

    /// The authorized signers in ascending byte order.
    ///
    /// This ordering is the canonical round-robin production schedule.
    pub fn signers(&self) -> Vec<Address> {
        self.signers.iter().copied().collect()
    }

    /// Whether `signer` is the designated producer at the given height.
    pub fn in_turn(&self, number: u64, signer: &Address) -> Result<bool, ConsensusError> {
        if self.signers.is_empty() {
            return Err(ConsensusError::EmptySignerSet);
        }
        let offset = self
            .signers
            .iter()
            .position(|s| s == signer)
            .unwrap_or(self.signers.len());
        Ok(number % self.signers.len() as u64 == offset as u64)
    }

    /// Whether it makes sense to cast the given vote in this snapshot's
    /// context: only votes that would change the target's status count.
    pub fn valid_vote(&self, address: &Address, authorize: bool) -> bool {
        let signer = self.signers.contains(address);
        (signer && !authorize) || (!signer && authorize)
    }

    /// Add a new vote into the tally. Returns false for meaningless votes.
    fn cast(&mut self, address: Address, authorize: bool) -> bool {
        if !self.valid_vote(&address, authorize) {
            return false;
        }
        // Tallies are plain aggregates: read by value, write back.
        match self.tally.get(&address).copied() {
            Some(mut old) => {
                old.votes += 1;
                self.tally.insert(address, old);
            }
            None => {
                self.tally.insert(address, Tally { authorize, votes: 1 });
            }
        }
        true
    }

    /// Remove a previously cast vote from the tally.
    fn uncast(&mut self, address: Address, authorize: bool) -> bool {
        // Dangling votes are dropped silently.
        let Some(tally) = self.tally.get(&address).copied() else {
            return false;
        };
        // Only revert counted votes.
        if tally.authorize != authorize {
            return false;
        }
        if tally.votes > 1 {
            self.tally.insert(
                address,
                Tally {
                    authorize: tally.authorize,
                    votes: tally.votes - 1,
                },
            );
        } else {
            self.tally.remove(&address);
        }
        true
    }

    /// Create a new snapshot by applying the given headers on top of this
    /// one.
    ///
    /// Headers must form a contiguous run starting at `self.number + 1`.
    /// The input snapshot is untouched; on error nothing is committed.
    pub fn apply(&self, headers: &[Header]) -> Result<Snapshot, ConsensusError> {
        if headers.is_empty() {
            return Ok(self.clone());
        }
        // Sanity-check that the headers can be applied.
        for pair in headers.windows(2) {
            if pair[1].number != pair[0].number + 1 {
                return Err(ConsensusError::InvalidVotingChain);
            }
        }
        if headers[0].number != self.number + 1 {
            return Err(ConsensusError::InvalidVotingChain);
        }
        let mut snap = self.clone();

        let start = Instant::now();
        let mut logged = Instant::now();
        for (i, header) in headers.iter().enumerate() {
            let number = header.number;

            // Remove any votes on checkpoint blocks.
            if number % snap.params.epoch_length == 0 {
                snap.votes.clear();
                snap.tally.clear();
            }
            // Delete the oldest producer from the rotation window to allow
            // it to sign again.
            let limit = snap.signers.len() as u64 / 2 + 1;
            if number >= limit {
                snap.recents.remove(&(number - limit));
            }
            // Resolve the producer and check it against the signer set.
            let signer = snap.recovery.recover(header)?;
            if !snap.signers.contains(&signer) {
                return Err(ConsensusError::UnauthorizedSigner(signer));
            }
            if snap.recents.values().any(|recent| *recent == signer) {
                return Err(ConsensusError::RecentlySigned(signer));
            }
            snap.recents.insert(number, signer);

            // Header authorized: discard the signer's previous vote on the
            // same target, if any. At most one can stand.
            if let Some(pos) = snap
                .votes
                .iter()
                .position(|v| v.signer == signer && v.address == header.coinbase)
            {
                let old = snap.votes.remove(pos);
                snap.uncast(old.address, old.authorize);
            }
            // Tally up the new vote from the signer.
            let authorize = header
                .nonce
                .decode_vote()
                .ok_or(ConsensusError::InvalidVote)?;
            if snap.cast(header.coinbase, authorize) {
                snap.votes.push(Vote {
                    signer,
                    block: number,
                    address: header.coinbase,
                    authorize,
                });
            }
            // A strict majority of the current signer set settles the
            // proposal.
            if let Some(tally) = snap.tally.get(&header.coinbase).copied() {
                if tally.votes > snap.signers.len() / 2 {
                    if tally.authorize {
                        snap.signers.insert(header.coinbase);
                    } else {
                        snap.signers.remove(&header.coinbase);

                        // The signer set shrank; the rotation window may
                        // have shrunk with it.
                        let limit = snap.signers.len() as u64 / 2 + 1;
                        if number >= limit {
                            snap.recents.remove(&(number - limit));
                        }
                        // Discard any votes the deauthorized signer cast.
                        let mut i = 0;
                        while i < snap.votes.len() {
                            if snap.votes[i].signer == header.coinbase {
                                let purged = snap.votes.remove(i);
                                snap.uncast(purged.address, purged.authorize);
                            } else {
                                i += 1;
                            }
                        }
                    }
                    // The matter is settled: drop every vote around the
                    // just-changed account.
                    snap.votes.retain(|v| v.address != header.coinbase);
                    snap.tally.remove(&header.coinbase);
                }
            }
            // Long replays (cold recovery cache) deserve a progress note.
            if logged.elapsed() > PROGRESS_LOG_INTERVAL {
                info!(
                    processed = i,
                    total = headers.len(),
                    elapsed = ?start.elapsed(),
                    "reconstructing voting history"
                );
                logged = Instant::now();
            }
        }
        if start.elapsed() > PROGRESS_LOG_INTERVAL {
            debug!(
                processed = headers.len(),
                elapsed = ?start.elapsed(),
                "reconstructed voting history"
            );
        }
        snap.number += headers.len() as u64;
        snap.hash = headers[headers.len() - 1].hash;

        Ok(snap)
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
            && self.hash == other.hash
            && self.signers == other.signers
            && self.recents == other.recents
            && self.votes == other.votes
            && self.tally == other.tally
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("number", &self.number)
            .field("hash", &self.hash)
            .field("signers", &self.signers)
            .field("recents", &self.recents)
            .field("votes", &self.votes)
            .field("tally", &self.tally)
            .finish()
    }
}
