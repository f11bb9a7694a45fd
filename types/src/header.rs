//! The subset of a block header consumed by the voting engine.

use crate::{Address, BlockHash};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The 8-byte header nonce carrying the ballot direction.
///
/// Only two values are meaningful: all-ones proposes to authorize the
/// coinbase address, all-zeros proposes to drop it. Anything else is an
/// invalid vote.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nonce([u8; 8]);

impl Nonce {
    /// Sentinel for a vote to add a new signer.
    pub const AUTHORIZE: Self = Self([0xff; 8]);
    /// Sentinel for a vote to remove an existing signer.
    pub const DROP: Self = Self([0x00; 8]);

    pub fn new(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// Decode the ballot direction, or `None` if the nonce is neither
    /// sentinel.
    pub fn decode_vote(&self) -> Option<bool> {
        match *self {
            Self::AUTHORIZE => Some(true),
            Self::DROP => Some(false),
            _ => None,
        }
    }
}

impl Default for Nonce {
    fn default() -> Self {
        Self::DROP
    }
}

impl fmt::Debug for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nonce(")?;
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        write!(f, ")")
    }
}

/// The header fields the voting engine reads.
///
/// `hash` identifies the block; `coinbase` is the address being voted on;
/// `nonce` encodes the ballot direction; `seal` carries the opaque
/// signature bytes the recovery adapter resolves the producer from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub number: u64,
    pub hash: BlockHash,
    pub coinbase: Address,
    pub nonce: Nonce,
    pub seal: Vec<u8>,
}
