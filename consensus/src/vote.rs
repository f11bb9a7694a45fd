//! Standing votes and per-target tallies.

use serde::{Deserialize, Serialize};
use signet_types::Address;

/// A single vote an authorized signer cast to modify the signer list.
///
/// Votes are immutable once recorded; they are removed when superseded by
/// a newer ballot from the same signer, when the proposal settles, or on
/// an epoch checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Authorized signer that cast this vote.
    pub signer: Address,
    /// Block number the vote was cast in.
    pub block: u64,
    /// Account being voted on.
    pub address: Address,
    /// Whether to authorize or deauthorize the voted account.
    pub authorize: bool,
}

/// Running vote count for one target address.
///
/// The direction is fixed by the first vote recorded for the target; the
/// entry exists only while at least one vote stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Whether the proposal is about authorizing or kicking the target.
    pub authorize: bool,
    /// Number of standing votes for the proposal.
    pub votes: usize,
}
