//! Fundamental types for the Signet proof-of-authority engine.
//!
//! This crate defines the value types shared across the workspace:
//! addresses, block hashes, the consumed header fields, and engine
//! parameters.

pub mod address;
pub mod hash;
pub mod header;
pub mod params;

pub use address::Address;
pub use hash::BlockHash;
pub use header::{Header, Nonce};
pub use params::EngineParams;
