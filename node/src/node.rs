//! The oracle node: owns the record store and the quorum aggregator and
//! routes reporter votes, resolver decisions and corrections to them.

use std::sync::Arc;

use oracle_consensus::{QuorumAggregator, VoteOutcome};
use oracle_ledger::{Collaborators, RecordStore};
use oracle_types::{Address, EventBus, Record};

use crate::config::NodeConfig;
use crate::error::NodeError;
use crate::metrics::OracleMetrics;

pub struct OracleNode {
    store: RecordStore,
    aggregator: QuorumAggregator,
    metrics: OracleMetrics,
}

impl OracleNode {
    /// Build a node from its configuration.
    ///
    /// `events` may already carry subscribers; the node adds its metrics
    /// listener before sharing the bus with the store and the aggregator.
    pub fn new(
        config: &NodeConfig,
        collaborators: Collaborators,
        mut events: EventBus,
    ) -> Result<Self, NodeError> {
        config.validate()?;

        let metrics = OracleMetrics::new()?;
        let observer = metrics.clone();
        events.subscribe(Box::new(move |event| observer.observe(event)));
        let events = Arc::new(events);

        let access = Arc::clone(&collaborators.access);
        let store = RecordStore::new(
            config.genesis.clone(),
            config.store_config(),
            collaborators,
            Arc::clone(&events),
        )?;
        let aggregator = QuorumAggregator::new(
            config.aggregator.clone(),
            config.quorum.clone(),
            access,
            events,
        )?;

        tracing::info!(
            aggregator = %config.aggregator,
            updater = %config.effective_updater(),
            genesis_end = config.genesis.update_end_block,
            "oracle node started"
        );

        let node = Self {
            store,
            aggregator,
            metrics,
        };
        node.metrics.sync_store(&node.store);
        Ok(node)
    }

    /// A reporter's vote for the record covering a period.
    pub fn submit_report(
        &mut self,
        reporter: &Address,
        record: Record,
    ) -> Result<VoteOutcome, NodeError> {
        let outcome = self
            .aggregator
            .receive_record(reporter, record, &mut self.store)?;
        self.metrics.sync_store(&self.store);
        Ok(outcome)
    }

    pub fn accept_pending(&mut self, resolver: &Address) -> Result<usize, NodeError> {
        let result = self.store.accept_pending_update(resolver);
        // a settlement failure still appends the record
        self.metrics.sync_store(&self.store);
        Ok(result?)
    }

    pub fn reject_pending(&mut self, resolver: &Address) -> Result<Record, NodeError> {
        let record = self.store.reject_pending_update(resolver)?;
        self.metrics.sync_store(&self.store);
        Ok(record)
    }

    pub fn modify_record(
        &mut self,
        modifier: &Address,
        index: usize,
        replacement: Record,
    ) -> Result<(), NodeError> {
        let result = self.store.modify_existing_record(modifier, index, replacement);
        self.metrics.sync_store(&self.store);
        Ok(result?)
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Direct access for the runtime setters.
    pub fn store_mut(&mut self) -> &mut RecordStore {
        &mut self.store
    }

    pub fn aggregator(&self) -> &QuorumAggregator {
        &self.aggregator
    }

    pub fn aggregator_mut(&mut self) -> &mut QuorumAggregator {
        &mut self.aggregator
    }

    pub fn metrics(&self) -> &OracleMetrics {
        &self.metrics
    }
}
