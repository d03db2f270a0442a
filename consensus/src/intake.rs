//! Where quorum records go.

use oracle_ledger::{IntakeOutcome, LedgerError, RecordStore};
use oracle_types::{Address, Record};

/// Downstream receiver of quorum records.
pub trait RecordIntake {
    /// Whether the latest or the pending record already reaches `end_block`.
    fn covers_period(&self, end_block: u64) -> bool;

    /// Hand over a record on behalf of `submitter`.
    fn submit(&mut self, submitter: &Address, record: Record) -> Result<IntakeOutcome, LedgerError>;
}

impl RecordIntake for RecordStore {
    fn covers_period(&self, end_block: u64) -> bool {
        self.latest_record().update_end_block >= end_block
            || self
                .pending_update_record()
                .is_some_and(|pending| pending.update_end_block >= end_block)
    }

    fn submit(&mut self, submitter: &Address, record: Record) -> Result<IntakeOutcome, LedgerError> {
        self.receive_record(submitter, record)
    }
}
