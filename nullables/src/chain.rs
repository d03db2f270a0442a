//! Nullable chain: deterministic block height for testing.

use oracle_types::ChainHeight;
use std::sync::atomic::{AtomicU64, Ordering};

/// A deterministic chain head.
///
/// Height only advances when you tell it to.
pub struct NullChain {
    height: AtomicU64,
}

impl NullChain {
    pub fn new(initial_height: u64) -> Self {
        Self {
            height: AtomicU64::new(initial_height),
        }
    }

    /// Advance the head by a number of blocks.
    pub fn advance(&self, blocks: u64) {
        self.height.fetch_add(blocks, Ordering::SeqCst);
    }

    /// Set the head to a specific height.
    pub fn set(&self, height: u64) {
        self.height.store(height, Ordering::SeqCst);
    }
}

impl ChainHeight for NullChain {
    fn current_block(&self) -> u64 {
        self.height.load(Ordering::SeqCst)
    }
}
