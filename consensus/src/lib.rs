//! Consensus: multi-reporter quorum over oracle records.
//!
//! Independent reporters each submit the record they computed for a period.
//! Votes are keyed by the record's content hash; once enough distinct
//! reporters agree on the same hash the record is forwarded to the record
//! store, at most once per period.
//!
//! ## Module overview
//!
//! - [`tally`]: Per-period vote bookkeeping with re-vote support.
//! - [`aggregator`]: Quorum evaluation and forwarding.
//! - [`intake`]: The seam between the aggregator and the record store.
//! - [`error`]: Consensus error types.

pub mod aggregator;
pub mod error;
pub mod intake;
pub mod tally;

pub use aggregator::{QuorumAggregator, QuorumStatus, VoteOutcome};
pub use error::ConsensusError;
pub use intake::RecordIntake;
pub use tally::{VoteChange, VoteTally};
