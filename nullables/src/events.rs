//! Captures emitted events for assertions.

use crate::lock;
use oracle_types::{EventBus, OracleEvent};
use std::sync::{Arc, Mutex};

/// Shared buffer of every event seen on a bus.
#[derive(Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<OracleEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe this recorder to `bus`.
    pub fn attach(&self, bus: &mut EventBus) {
        let events = Arc::clone(&self.events);
        bus.subscribe(Box::new(move |event| lock(&events).push(event.clone())));
    }

    pub fn events(&self) -> Vec<OracleEvent> {
        lock(&self.events).clone()
    }

    /// Events matching a predicate.
    pub fn count(&self, pred: impl Fn(&OracleEvent) -> bool) -> usize {
        lock(&self.events).iter().filter(|e| pred(e)).count()
    }

    pub fn clear(&self) {
        lock(&self.events).clear();
    }
}
