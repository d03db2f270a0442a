//! Nullable settlement: records every call, optionally refuses them.

use crate::lock;
use oracle_types::{Settlement, SettlementError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// One `process_returns` invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementCall {
    pub reward_amount: u128,
    pub principal_amount: u128,
    pub include_external_yield: bool,
}

pub struct NullSettlement {
    calls: Mutex<Vec<SettlementCall>>,
    failing: AtomicBool,
}

impl NullSettlement {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// Make subsequent calls fail (they are still recorded).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<SettlementCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

impl Default for NullSettlement {
    fn default() -> Self {
        Self::new()
    }
}

impl Settlement for NullSettlement {
    fn process_returns(
        &self,
        reward_amount: u128,
        principal_amount: u128,
        include_external_yield: bool,
    ) -> Result<(), SettlementError> {
        lock(&self.calls).push(SettlementCall {
            reward_amount,
            principal_amount,
            include_external_yield,
        });
        if self.failing.load(Ordering::SeqCst) {
            return Err(SettlementError("settlement offline".into()));
        }
        Ok(())
    }
}
