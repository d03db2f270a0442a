//! Interfaces of the external systems the oracle reads from and writes to.
//!
//! Token supply, withdrawal queues and fee distribution live behind these
//! seams; the oracle only needs the narrow view below.

use thiserror::Error;

/// Ground truth from the validator-management layer.
pub trait ValidatorRegistry: Send + Sync {
    /// Total wei ever sent to validators.
    fn total_deposited_in_validators(&self) -> u128;

    /// Number of validators ever initiated.
    fn initiated_validator_count(&self) -> u64;
}

/// Downstream settlement of a period's realised returns.
pub trait Settlement: Send + Sync {
    fn process_returns(
        &self,
        reward_amount: u128,
        principal_amount: u128,
        include_external_yield: bool,
    ) -> Result<(), SettlementError>;
}

/// Protocol-wide pause switch.
pub trait PauseControl: Send + Sync {
    /// Whether record intake is currently paused.
    fn is_intake_paused(&self) -> bool;

    /// Halt every pausable subsystem.
    fn halt_all(&self);
}

/// Current chain height.
pub trait ChainHeight: Send + Sync {
    fn current_block(&self) -> u64;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("settlement rejected returns: {0}")]
pub struct SettlementError(pub String);
