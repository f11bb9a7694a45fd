use signet_store::StoreError;
use signet_types::Address;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsensusError {
    #[error("headers are non-contiguous or do not extend the snapshot")]
    InvalidVotingChain,

    #[error("signer {0} is not in the authorized set")]
    UnauthorizedSigner(Address),

    #[error("signer {0} is still inside the rotation window")]
    RecentlySigned(Address),

    #[error("header nonce is neither the authorize nor the drop sentinel")]
    InvalidVote,

    #[error("signer set is empty")]
    EmptySignerSet,

    #[error("signer recovery failed: {0}")]
    Recovery(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("snapshot serialization error: {0}")]
    Serialization(String),
}
