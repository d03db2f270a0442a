//! The record store: canonical record sequence plus one pending slot.
//!
//! States: `Normal` (no pending update) and `AwaitingResolution` (a
//! bound-violating record is parked). Only the designated updater can
//! advance the sequence, and never while a record is pending.

use crate::bounds::sanity_check;
use crate::config::{self, StoreConfig};
use crate::error::LedgerError;
use oracle_types::{
    AccessControl, Address, BoundViolation, ChainHeight, ConfigField, ConfigValue, EventBus,
    OracleEvent, PauseControl, Record, Role, Settlement, ValidatorRegistry,
};
use std::sync::Arc;

/// External systems the store consults or notifies.
#[derive(Clone)]
pub struct Collaborators {
    pub access: Arc<dyn AccessControl>,
    pub registry: Arc<dyn ValidatorRegistry>,
    pub settlement: Arc<dyn Settlement>,
    pub pauser: Arc<dyn PauseControl>,
    pub chain: Arc<dyn ChainHeight>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreState {
    Normal,
    AwaitingResolution,
}

/// Result of a record intake that did not fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntakeOutcome {
    /// Appended at `index`.
    Accepted { index: usize },
    /// Parked as pending; a halt was requested.
    Pending(BoundViolation),
}

pub struct RecordStore {
    records: Vec<Record>,
    pending: Option<Record>,
    config: StoreConfig,
    collaborators: Collaborators,
    events: Arc<EventBus>,
}

impl RecordStore {
    /// Create a store seeded with `genesis` at index 0.
    pub fn new(
        genesis: Record,
        config: StoreConfig,
        collaborators: Collaborators,
        events: Arc<EventBus>,
    ) -> Result<Self, LedgerError> {
        config.validate()?;
        Ok(Self {
            records: vec![genesis],
            pending: None,
            config,
            collaborators,
            events,
        })
    }

    // ── Intake ──────────────────────────────────────────────────────────

    /// Submit the next record. Only the designated updater may call this.
    ///
    /// A structurally valid, final record that fails a plausibility bound is
    /// not an error: it becomes the pending update, a halt is requested, and
    /// `Ok(IntakeOutcome::Pending)` is returned.
    pub fn receive_record(
        &mut self,
        caller: &Address,
        candidate: Record,
    ) -> Result<IntakeOutcome, LedgerError> {
        if self.collaborators.pauser.is_intake_paused() {
            return Err(LedgerError::IntakePaused);
        }
        if *caller != self.config.updater {
            return Err(LedgerError::UnauthorizedUpdater {
                caller: caller.clone(),
                expected: self.config.updater.clone(),
            });
        }
        if self.pending.is_some() {
            return Err(LedgerError::UpdatePending);
        }

        self.validate_update(self.records.len() - 1, &candidate)?;

        let finalizing_block = candidate
            .update_end_block
            .saturating_add(self.config.finalization_delay_blocks);
        let current = self.collaborators.chain.current_block();
        if current < finalizing_block {
            return Err(LedgerError::NotFinal {
                finalizing_block,
                current,
            });
        }

        if let Err(violation) = sanity_check(self.latest_record(), &candidate, &self.config.bounds)
        {
            tracing::warn!(
                start = candidate.update_start_block,
                end = candidate.update_end_block,
                observed = %violation.observed,
                bound = %violation.bound,
                "record failed sanity check: {}; halting",
                violation.reason()
            );
            self.pending = Some(candidate.clone());
            self.events.emit(&OracleEvent::BoundViolation {
                violation: violation.clone(),
                record: candidate,
            });
            self.collaborators.pauser.halt_all();
            return Ok(IntakeOutcome::Pending(violation));
        }

        let index = self.push_record(candidate)?;
        Ok(IntakeOutcome::Accepted { index })
    }

    /// Structural checks of `candidate` as the successor of `records[prev_index]`.
    pub fn validate_update(&self, prev_index: usize, candidate: &Record) -> Result<(), LedgerError> {
        let prev = self
            .records
            .get(prev_index)
            .ok_or(LedgerError::RecordNotFound(prev_index))?;

        if candidate.update_end_block <= candidate.update_start_block {
            return Err(LedgerError::EndNotAfterStart {
                start: candidate.update_start_block,
                end: candidate.update_end_block,
            });
        }

        let expected = prev.update_end_block.saturating_add(1);
        if candidate.update_start_block != expected {
            return Err(LedgerError::Discontinuous {
                expected,
                actual: candidate.update_start_block,
            });
        }

        let sent = self.collaborators.registry.total_deposited_in_validators();
        if candidate.total_processed_deposit > sent {
            return Err(LedgerError::MoreDepositsProcessedThanSent {
                processed: candidate.total_processed_deposit,
                sent,
            });
        }

        let initiated = self.collaborators.registry.initiated_validator_count();
        if candidate.total_validators() > initiated as u128 {
            return Err(LedgerError::MoreValidatorsThanInitiated {
                reported: candidate.total_validators(),
                initiated,
            });
        }
        Ok(())
    }

    // ── Pending resolution ──────────────────────────────────────────────

    /// Append the pending record as-is, without re-running the bounds.
    pub fn accept_pending_update(&mut self, caller: &Address) -> Result<usize, LedgerError> {
        self.require_role(caller, Role::PendingUpdateResolver)?;
        let record = self.pending.take().ok_or(LedgerError::NoUpdatePending)?;
        tracing::info!(
            resolver = %caller,
            end = record.update_end_block,
            "pending update accepted"
        );
        self.push_record(record)
    }

    /// Discard the pending record.
    pub fn reject_pending_update(&mut self, caller: &Address) -> Result<Record, LedgerError> {
        self.require_role(caller, Role::PendingUpdateResolver)?;
        let record = self.pending.take().ok_or(LedgerError::NoUpdatePending)?;
        tracing::info!(
            resolver = %caller,
            end = record.update_end_block,
            "pending update rejected"
        );
        self.events.emit(&OracleEvent::PendingUpdateRejected {
            record: record.clone(),
        });
        Ok(record)
    }

    // ── Correction ──────────────────────────────────────────────────────

    /// Replace the interior fields of an accepted record.
    ///
    /// The period itself cannot change. Only increases in withdrawn amounts
    /// are settled, and always without external yield.
    pub fn modify_existing_record(
        &mut self,
        caller: &Address,
        index: usize,
        replacement: Record,
    ) -> Result<(), LedgerError> {
        self.require_role(caller, Role::RecordModifier)?;
        if index == 0 {
            return Err(LedgerError::GenesisImmutable);
        }
        let existing = self
            .records
            .get(index)
            .ok_or(LedgerError::RecordNotFound(index))?;
        if !existing.same_period(&replacement) {
            return Err(LedgerError::PeriodMismatch {
                stored_start: existing.update_start_block,
                stored_end: existing.update_end_block,
                replacement_start: replacement.update_start_block,
                replacement_end: replacement.update_end_block,
            });
        }
        self.validate_update(index - 1, &replacement)?;

        let missing_rewards = replacement
            .window_withdrawn_reward_amount
            .saturating_sub(existing.window_withdrawn_reward_amount);
        let missing_principal = replacement
            .window_withdrawn_principal_amount
            .saturating_sub(existing.window_withdrawn_principal_amount);

        self.records[index] = replacement.clone();
        tracing::info!(index, modifier = %caller, "record modified");
        self.events.emit(&OracleEvent::RecordModified {
            index,
            record: replacement,
        });

        if missing_rewards > 0 || missing_principal > 0 {
            self.settle(index, missing_rewards, missing_principal, false)?;
        }
        Ok(())
    }

    // ── Reads ───────────────────────────────────────────────────────────

    pub fn latest_record(&self) -> &Record {
        // the genesis record is never removed
        &self.records[self.records.len() - 1]
    }

    pub fn pending_update_record(&self) -> Option<&Record> {
        self.pending.as_ref()
    }

    pub fn has_pending_update(&self) -> bool {
        self.pending.is_some()
    }

    pub fn records_number(&self) -> usize {
        self.records.len()
    }

    pub fn record(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn state(&self) -> StoreState {
        if self.pending.is_some() {
            StoreState::AwaitingResolution
        } else {
            StoreState::Normal
        }
    }

    // ── Configuration ───────────────────────────────────────────────────

    pub fn set_finalization_delay(&mut self, caller: &Address, blocks: u64) -> Result<(), LedgerError> {
        self.require_role(caller, Role::OracleManager)?;
        config::check_finalization_delay(blocks)?;
        self.config.finalization_delay_blocks = blocks;
        self.config_changed(ConfigField::FinalizationDelayBlocks, ConfigValue::Number(blocks as u128));
        Ok(())
    }

    pub fn set_min_report_size(&mut self, caller: &Address, blocks: u64) -> Result<(), LedgerError> {
        self.require_role(caller, Role::OracleManager)?;
        config::check_min_report_size(blocks)?;
        self.config.bounds.min_report_size_blocks = blocks;
        self.config_changed(ConfigField::MinReportSizeBlocks, ConfigValue::Number(blocks as u128));
        Ok(())
    }

    pub fn set_min_deposit_per_validator(&mut self, caller: &Address, wei: u128) -> Result<(), LedgerError> {
        self.require_role(caller, Role::OracleManager)?;
        let field = ConfigField::MinDepositPerValidator;
        config::check_deposit_range(field, wei, self.config.bounds.max_deposit_per_validator)?;
        self.config.bounds.min_deposit_per_validator = wei;
        self.config_changed(field, ConfigValue::Number(wei));
        Ok(())
    }

    pub fn set_max_deposit_per_validator(&mut self, caller: &Address, wei: u128) -> Result<(), LedgerError> {
        self.require_role(caller, Role::OracleManager)?;
        let field = ConfigField::MaxDepositPerValidator;
        config::check_deposit_range(field, self.config.bounds.min_deposit_per_validator, wei)?;
        self.config.bounds.max_deposit_per_validator = wei;
        self.config_changed(field, ConfigValue::Number(wei));
        Ok(())
    }

    pub fn set_min_gain_per_block_ppt(&mut self, caller: &Address, ppt: u64) -> Result<(), LedgerError> {
        self.require_role(caller, Role::OracleManager)?;
        let field = ConfigField::MinGainPerBlockPpt;
        config::check_gain_range(field, ppt, self.config.bounds.max_gain_per_block_ppt)?;
        self.config.bounds.min_gain_per_block_ppt = ppt;
        self.config_changed(field, ConfigValue::Number(ppt as u128));
        Ok(())
    }

    pub fn set_max_gain_per_block_ppt(&mut self, caller: &Address, ppt: u64) -> Result<(), LedgerError> {
        self.require_role(caller, Role::OracleManager)?;
        let field = ConfigField::MaxGainPerBlockPpt;
        config::check_gain_range(field, self.config.bounds.min_gain_per_block_ppt, ppt)?;
        self.config.bounds.max_gain_per_block_ppt = ppt;
        self.config_changed(field, ConfigValue::Number(ppt as u128));
        Ok(())
    }

    pub fn set_max_loss_ppm(&mut self, caller: &Address, ppm: u64) -> Result<(), LedgerError> {
        self.require_role(caller, Role::OracleManager)?;
        config::check_max_loss(ppm)?;
        self.config.bounds.max_loss_ppm = ppm;
        self.config_changed(ConfigField::MaxLossPpm, ConfigValue::Number(ppm as u128));
        Ok(())
    }

    /// Change the designated submitter.
    pub fn set_updater(&mut self, caller: &Address, updater: Address) -> Result<(), LedgerError> {
        self.require_role(caller, Role::OracleManager)?;
        config::check_updater(&updater)?;
        self.config.updater = updater.clone();
        self.config_changed(ConfigField::Updater, ConfigValue::Address(updater));
        Ok(())
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn require_role(&self, caller: &Address, role: Role) -> Result<(), LedgerError> {
        if !self.collaborators.access.has_role(role, caller) {
            return Err(LedgerError::MissingRole {
                caller: caller.clone(),
                role,
            });
        }
        Ok(())
    }

    /// Append, announce, then settle. The record stays appended even if
    /// settlement fails.
    fn push_record(&mut self, record: Record) -> Result<usize, LedgerError> {
        let index = self.records.len();
        let reward = record.window_withdrawn_reward_amount;
        let principal = record.window_withdrawn_principal_amount;
        tracing::info!(
            index,
            start = record.update_start_block,
            end = record.update_end_block,
            "record added"
        );
        self.records.push(record.clone());
        self.events.emit(&OracleEvent::RecordAdded { index, record });
        self.settle(index, reward, principal, true)?;
        Ok(index)
    }

    fn settle(
        &self,
        index: usize,
        reward: u128,
        principal: u128,
        include_external_yield: bool,
    ) -> Result<(), LedgerError> {
        self.collaborators
            .settlement
            .process_returns(reward, principal, include_external_yield)
            .map_err(|e| {
                tracing::error!(index, "settlement failed: {e}");
                LedgerError::Settlement {
                    index,
                    reason: e.to_string(),
                }
            })
    }

    fn config_changed(&self, field: ConfigField, value: ConfigValue) {
        tracing::info!(%field, %value, "config changed");
        self.events
            .emit(&OracleEvent::ConfigChanged { field, value });
    }
}
