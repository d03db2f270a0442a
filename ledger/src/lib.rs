//! Append-only oracle record store.
//!
//! Records describe consecutive block-height periods of a validator pool.
//! A candidate is appended only if it continues the sequence, is backed by
//! the validator registry's ground truth, is final, and passes the
//! [`bounds`] plausibility checks. An implausible candidate is parked as the
//! single pending update and a protocol-wide halt is requested; a resolver
//! then accepts or rejects it.
//!
//! ## Module overview
//!
//! - [`bounds`]: Stateless plausibility checks between consecutive records.
//! - [`config`]: Store configuration and its range checks.
//! - [`store`]: The record store state machine.
//! - [`error`]: Ledger error types.

pub mod bounds;
pub mod config;
pub mod error;
pub mod store;

pub use bounds::sanity_check;
pub use config::{StoreConfig, DEFAULT_FINALIZATION_DELAY_BLOCKS, MAX_FINALIZATION_DELAY_BLOCKS};
pub use error::{ErrorKind, LedgerError};
pub use store::{Collaborators, IntakeOutcome, RecordStore, StoreState};
