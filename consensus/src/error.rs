use oracle_types::{Address, Role};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsensusError {
    #[error("{caller} does not hold role {role}")]
    MissingRole { caller: Address, role: Role },

    #[error("relative threshold {relative_bps} bps exceeds {denominator} bps")]
    RelativeThresholdTooHigh { relative_bps: u16, denominator: u64 },

    #[error("target report window must be at least one block")]
    EmptyTargetWindow,
}
