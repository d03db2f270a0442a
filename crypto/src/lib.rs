//! Hashing primitives for the staking oracle.
//!
//! Reporters vote on the Blake2b-256 digest of a record's canonical encoding;
//! two reports match exactly when every field matches.

pub mod hash;

pub use hash::{blake2b_256, blake2b_256_multi, hash_record};
