//! Quorum aggregator: tallies reporter votes and forwards agreed records.
//!
//! A record hash reaches quorum when both hold:
//! - `count >= absolute_threshold`
//! - `count * 10_000 >= registered_reporters * relative_threshold_bps`
//!
//! Forwarding happens at most once per period: if the store already holds a
//! latest or pending record reaching the period's end block, nothing is sent.
//! A failed forward is reported as an event and never fails the vote.

use crate::error::ConsensusError;
use crate::intake::RecordIntake;
use crate::tally::{VoteChange, VoteTally};
use oracle_crypto::hash_record;
use oracle_ledger::{IntakeOutcome, LedgerError};
use oracle_types::{
    AccessControl, Address, ConfigField, ConfigValue, EventBus, OracleEvent, QuorumParams, Record,
    RecordHash, Role, BASIS_POINTS_DENOMINATOR,
};
use std::sync::Arc;

/// What happened after a vote was tallied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuorumStatus {
    /// Not enough matching votes yet.
    NotReached,
    /// Quorum holds but the store already covers this period.
    AlreadyReceived,
    /// Forwarded; the store's verdict.
    Forwarded(IntakeOutcome),
    /// Forwarded; the store refused. Reporters may retry by voting again.
    ForwardFailed(LedgerError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteOutcome {
    pub hash: RecordHash,
    /// Matching votes for `hash` after this vote.
    pub votes: u64,
    pub change: VoteChange,
    pub status: QuorumStatus,
}

pub struct QuorumAggregator {
    /// Identity used when submitting to the store.
    address: Address,
    params: QuorumParams,
    tally: VoteTally,
    access: Arc<dyn AccessControl>,
    events: Arc<EventBus>,
}

impl QuorumAggregator {
    pub fn new(
        address: Address,
        params: QuorumParams,
        access: Arc<dyn AccessControl>,
        events: Arc<EventBus>,
    ) -> Result<Self, ConsensusError> {
        check_relative_threshold(params.relative_threshold_bps)?;
        check_target_window(params.target_report_window_blocks)?;
        Ok(Self {
            address,
            params,
            tally: VoteTally::new(),
            access,
            events,
        })
    }

    /// Register `reporter`'s vote for `record` and forward on first quorum.
    pub fn receive_record<I: RecordIntake>(
        &mut self,
        reporter: &Address,
        record: Record,
        intake: &mut I,
    ) -> Result<VoteOutcome, ConsensusError> {
        self.require_role(reporter, Role::Reporter)?;

        let period = record.update_end_block;
        let hash = hash_record(&record);
        let change = self.tally.record_vote(period, reporter, hash);
        tracing::debug!(period, %reporter, %hash, ?change, "vote received");
        self.events.emit(&OracleEvent::VoteReceived {
            period,
            reporter: reporter.clone(),
            hash,
            record: record.clone(),
        });

        let votes = self.tally.count(period, &hash);
        let outcome = |status| VoteOutcome {
            hash,
            votes,
            change,
            status,
        };

        if !self.has_quorum(votes) {
            return Ok(outcome(QuorumStatus::NotReached));
        }
        if intake.covers_period(period) {
            tracing::debug!(period, "quorum already forwarded");
            return Ok(outcome(QuorumStatus::AlreadyReceived));
        }

        tracing::info!(period, %hash, votes, "quorum reached, forwarding record");
        self.events.emit(&OracleEvent::QuorumReached { period, hash });

        let status = match intake.submit(&self.address, record) {
            Ok(result) => QuorumStatus::Forwarded(result),
            Err(e) => {
                tracing::warn!(period, "forwarding quorum record failed: {e}");
                self.events.emit(&OracleEvent::ForwardFailed {
                    period,
                    reason: e.to_string(),
                });
                QuorumStatus::ForwardFailed(e)
            }
        };
        Ok(outcome(status))
    }

    /// Whether `votes` matching votes satisfy both thresholds.
    pub fn has_quorum(&self, votes: u64) -> bool {
        let registered = self.registered_reporters() as u128;
        votes >= self.params.absolute_threshold
            && votes as u128 * BASIS_POINTS_DENOMINATOR as u128
                >= registered * self.params.relative_threshold_bps as u128
    }

    pub fn set_quorum_thresholds(
        &mut self,
        caller: &Address,
        absolute: u64,
        relative_bps: u16,
    ) -> Result<(), ConsensusError> {
        self.require_role(caller, Role::QuorumManager)?;
        check_relative_threshold(relative_bps)?;
        self.params.absolute_threshold = absolute;
        self.params.relative_threshold_bps = relative_bps;
        tracing::info!(absolute, relative_bps, "quorum thresholds changed");
        self.events.emit(&OracleEvent::ConfigChanged {
            field: ConfigField::QuorumThresholds,
            value: ConfigValue::Thresholds {
                absolute,
                relative_bps,
            },
        });
        Ok(())
    }

    pub fn set_target_report_window(
        &mut self,
        caller: &Address,
        blocks: u64,
    ) -> Result<(), ConsensusError> {
        self.require_role(caller, Role::QuorumManager)?;
        check_target_window(blocks)?;
        self.params.target_report_window_blocks = blocks;
        tracing::info!(blocks, "target report window changed");
        self.events.emit(&OracleEvent::ConfigChanged {
            field: ConfigField::TargetReportWindowBlocks,
            value: ConfigValue::Number(blocks as u128),
        });
        Ok(())
    }

    /// Hash `reporter` last voted for in `period`.
    pub fn vote_hash(&self, period: u64, reporter: &Address) -> Option<RecordHash> {
        self.tally.vote_of(period, reporter)
    }

    pub fn vote_count(&self, period: u64, hash: &RecordHash) -> u64 {
        self.tally.count(period, hash)
    }

    pub fn total_votes(&self, period: u64) -> u64 {
        self.tally.total_votes(period)
    }

    pub fn registered_reporters(&self) -> u64 {
        self.access.role_member_count(Role::Reporter)
    }

    pub fn thresholds(&self) -> &QuorumParams {
        &self.params
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    fn require_role(&self, caller: &Address, role: Role) -> Result<(), ConsensusError> {
        if !self.access.has_role(role, caller) {
            return Err(ConsensusError::MissingRole {
                caller: caller.clone(),
                role,
            });
        }
        Ok(())
    }
}

fn check_relative_threshold(relative_bps: u16) -> Result<(), ConsensusError> {
    if relative_bps as u64 > BASIS_POINTS_DENOMINATOR {
        return Err(ConsensusError::RelativeThresholdTooHigh {
            relative_bps,
            denominator: BASIS_POINTS_DENOMINATOR,
        });
    }
    Ok(())
}

fn check_target_window(blocks: u64) -> Result<(), ConsensusError> {
    if blocks == 0 {
        return Err(ConsensusError::EmptyTargetWindow);
    }
    Ok(())
}
