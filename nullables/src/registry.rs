//! Nullable validator registry.

use crate::lock;
use oracle_types::ValidatorRegistry;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Validator-management ground truth that tests can move around.
pub struct NullValidatorRegistry {
    total_deposited: Mutex<u128>,
    initiated: AtomicU64,
}

impl NullValidatorRegistry {
    pub fn new(total_deposited: u128, initiated: u64) -> Self {
        Self {
            total_deposited: Mutex::new(total_deposited),
            initiated: AtomicU64::new(initiated),
        }
    }

    pub fn set_total_deposited(&self, amount: u128) {
        *lock(&self.total_deposited) = amount;
    }

    pub fn set_initiated(&self, count: u64) {
        self.initiated.store(count, Ordering::SeqCst);
    }
}

impl ValidatorRegistry for NullValidatorRegistry {
    fn total_deposited_in_validators(&self) -> u128 {
        *lock(&self.total_deposited)
    }

    fn initiated_validator_count(&self) -> u64 {
        self.initiated.load(Ordering::SeqCst)
    }
}
