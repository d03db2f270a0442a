//! Nullable infrastructure for deterministic testing.
//!
//! Every external system the oracle talks to sits behind a trait in
//! `oracle-types`. This crate provides in-memory implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Record every write so tests can assert on it
//!
//! Usage: swap real implementations for nullables in tests and replays.

pub mod access;
pub mod chain;
pub mod events;
pub mod pauser;
pub mod registry;
pub mod settlement;

pub use access::NullAccessControl;
pub use chain::NullChain;
pub use events::EventRecorder;
pub use pauser::NullPauser;
pub use registry::NullValidatorRegistry;
pub use settlement::{NullSettlement, SettlementCall};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the data if a panicking test poisoned it.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
