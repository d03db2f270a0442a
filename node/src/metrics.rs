//! Prometheus metrics for the oracle node.
//!
//! Counters are driven by [`OracleEvent`]s from the event bus; gauges are
//! refreshed from the record store after each mutating call.

use prometheus::{Encoder, IntCounter, IntGauge, Opts, Registry, TextEncoder};

use oracle_ledger::RecordStore;
use oracle_types::OracleEvent;

/// Oracle metrics backed by a dedicated Prometheus registry.
#[derive(Clone)]
pub struct OracleMetrics {
    pub registry: Registry,

    // -- Quorum --
    pub votes_received: IntCounter,
    pub quorums_reached: IntCounter,
    pub forward_failures: IntCounter,

    // -- Store --
    pub records_added: IntCounter,
    pub records_modified: IntCounter,
    pub bound_violations: IntCounter,
    pub pending_rejected: IntCounter,
    pub config_changes: IntCounter,

    pub record_count: IntGauge,
    pub pending_update: IntGauge,
    pub latest_end_block: IntGauge,
}

fn counter(registry: &Registry, name: &str, help: &str) -> Result<IntCounter, prometheus::Error> {
    let c = IntCounter::with_opts(Opts::new(name, help))?;
    registry.register(Box::new(c.clone()))?;
    Ok(c)
}

fn gauge(registry: &Registry, name: &str, help: &str) -> Result<IntGauge, prometheus::Error> {
    let g = IntGauge::with_opts(Opts::new(name, help))?;
    registry.register(Box::new(g.clone()))?;
    Ok(g)
}

impl OracleMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let r = &registry;

        Ok(Self {
            votes_received: counter(r, "oracle_votes_received_total", "Reporter votes tallied")?,
            quorums_reached: counter(r, "oracle_quorums_reached_total", "Records forwarded after reaching quorum")?,
            forward_failures: counter(r, "oracle_forward_failures_total", "Quorum records the store refused")?,
            records_added: counter(r, "oracle_records_added_total", "Records appended to the sequence")?,
            records_modified: counter(r, "oracle_records_modified_total", "Stored records corrected in place")?,
            bound_violations: counter(r, "oracle_bound_violations_total", "Candidates parked for failing a plausibility bound")?,
            pending_rejected: counter(r, "oracle_pending_rejected_total", "Pending records discarded by a resolver")?,
            config_changes: counter(r, "oracle_config_changes_total", "Runtime configuration changes")?,
            record_count: gauge(r, "oracle_record_count", "Records in the canonical sequence")?,
            pending_update: gauge(r, "oracle_pending_update", "1 while a record awaits resolution")?,
            latest_end_block: gauge(r, "oracle_latest_end_block", "End block of the latest record")?,
            registry,
        })
    }

    /// Update counters for a single event.
    pub fn observe(&self, event: &OracleEvent) {
        match event {
            OracleEvent::VoteReceived { .. } => self.votes_received.inc(),
            OracleEvent::QuorumReached { .. } => self.quorums_reached.inc(),
            OracleEvent::ForwardFailed { .. } => self.forward_failures.inc(),
            OracleEvent::RecordAdded { .. } => self.records_added.inc(),
            OracleEvent::RecordModified { .. } => self.records_modified.inc(),
            OracleEvent::BoundViolation { .. } => self.bound_violations.inc(),
            OracleEvent::PendingUpdateRejected { .. } => self.pending_rejected.inc(),
            OracleEvent::ConfigChanged { .. } => self.config_changes.inc(),
        }
    }

    /// Refresh the gauges from the store.
    pub fn sync_store(&self, store: &RecordStore) {
        self.record_count.set(store.records_number() as i64);
        self.pending_update.set(i64::from(store.has_pending_update()));
        self.latest_end_block
            .set(i64::try_from(store.latest_record().update_end_block).unwrap_or(i64::MAX));
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
