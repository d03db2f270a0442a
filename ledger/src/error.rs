use oracle_types::{Address, ConfigField, Role};
use thiserror::Error;

/// Coarse classification of [`LedgerError`]s for retry vs escalation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller lacks the role or is not the designated identity. Never retried.
    Access,
    /// Intake is halted protocol-wide.
    Paused,
    /// The record or the store state does not allow the call. Correct and resubmit.
    Structural,
    /// A parameter is out of range.
    Configuration,
    /// A downstream system failed after the store committed its own state.
    Collaborator,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("record intake is paused")]
    IntakePaused,

    #[error("{caller} does not hold role {role}")]
    MissingRole { caller: Address, role: Role },

    #[error("{caller} is not the designated updater {expected}")]
    UnauthorizedUpdater { caller: Address, expected: Address },

    #[error("cannot accept records while an update is pending")]
    UpdatePending,

    #[error("no update is pending")]
    NoUpdatePending,

    #[error("update end block {end} is not after start block {start}")]
    EndNotAfterStart { start: u64, end: u64 },

    #[error("update start block {actual} does not continue the sequence (expected {expected})")]
    Discontinuous { expected: u64, actual: u64 },

    #[error("processed deposits {processed} exceed deposits sent to validators {sent}")]
    MoreDepositsProcessedThanSent { processed: u128, sent: u128 },

    #[error("reported validators {reported} exceed initiated validators {initiated}")]
    MoreValidatorsThanInitiated { reported: u128, initiated: u64 },

    #[error("update is not final until block {finalizing_block} (current {current})")]
    NotFinal { finalizing_block: u64, current: u64 },

    #[error("the genesis record cannot be modified")]
    GenesisImmutable,

    #[error("record {0} does not exist")]
    RecordNotFound(usize),

    #[error(
        "replacement covers {replacement_start}..={replacement_end}, stored record covers {stored_start}..={stored_end}"
    )]
    PeriodMismatch {
        stored_start: u64,
        stored_end: u64,
        replacement_start: u64,
        replacement_end: u64,
    },

    #[error("invalid {field}: {reason}")]
    InvalidConfig { field: ConfigField, reason: String },

    #[error("settlement failed after record {index} was committed: {reason}")]
    Settlement { index: usize, reason: String },
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingRole { .. } | Self::UnauthorizedUpdater { .. } => ErrorKind::Access,
            Self::IntakePaused => ErrorKind::Paused,
            Self::InvalidConfig { .. } => ErrorKind::Configuration,
            Self::Settlement { .. } => ErrorKind::Collaborator,
            Self::UpdatePending
            | Self::NoUpdatePending
            | Self::EndNotAfterStart { .. }
            | Self::Discontinuous { .. }
            | Self::MoreDepositsProcessedThanSent { .. }
            | Self::MoreValidatorsThanInitiated { .. }
            | Self::NotFinal { .. }
            | Self::GenesisImmutable
            | Self::RecordNotFound(_)
            | Self::PeriodMismatch { .. } => ErrorKind::Structural,
        }
    }

    pub(crate) fn invalid(field: ConfigField, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
