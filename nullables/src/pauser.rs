//! Nullable pauser.

use oracle_types::PauseControl;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Pause switch that counts halt requests.
pub struct NullPauser {
    paused: AtomicBool,
    halts: AtomicUsize,
}

impl NullPauser {
    pub fn new() -> Self {
        Self {
            paused: AtomicBool::new(false),
            halts: AtomicUsize::new(0),
        }
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::SeqCst);
    }

    /// Number of `halt_all` calls so far.
    pub fn halt_count(&self) -> usize {
        self.halts.load(Ordering::SeqCst)
    }
}

impl Default for NullPauser {
    fn default() -> Self {
        Self::new()
    }
}

impl PauseControl for NullPauser {
    fn is_intake_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    fn halt_all(&self) {
        self.halts.fetch_add(1, Ordering::SeqCst);
        self.paused.store(true, Ordering::SeqCst);
    }
}
