//! Structured outcome of a failed plausibility check.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The individual plausibility checks, in evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundCheck {
    ReportTooSmall,
    WithdrawableValidatorsDecreased,
    TotalValidatorsDecreased,
    ProcessedDepositDecreased,
    DepositBelowMinimum,
    DepositAboveMaximum,
    BalanceBelowMinGainOrMaxLoss,
    BalanceAboveMaxGain,
}

impl BoundCheck {
    /// Human-readable rejection reason.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::ReportTooSmall => "report blocks below minimum bound",
            Self::WithdrawableValidatorsDecreased => "number of withdrawable validators decreased",
            Self::TotalValidatorsDecreased => "total number of validators decreased",
            Self::ProcessedDepositDecreased => "processed deposit amount decreased",
            Self::DepositBelowMinimum => "new deposits below min deposit per validator",
            Self::DepositAboveMaximum => "new deposits above max deposit per validator",
            Self::BalanceBelowMinGainOrMaxLoss => "consensus layer change below min gain or max loss",
            Self::BalanceAboveMaxGain => "consensus layer change above max gain",
        }
    }
}

impl fmt::Display for BoundCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// A record that is structurally valid but implausible.
///
/// `observed` is the offending value and `bound` the limit it crossed, both
/// in the unit of the failed check (blocks, validators or wei).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundViolation {
    pub check: BoundCheck,
    pub observed: u128,
    pub bound: u128,
}

impl BoundViolation {
    pub fn new(check: BoundCheck, observed: u128, bound: u128) -> Self {
        Self {
            check,
            observed,
            bound,
        }
    }

    pub fn reason(&self) -> &'static str {
        self.check.reason()
    }
}

impl fmt::Display for BoundViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (observed {}, bound {})",
            self.check.reason(),
            self.observed,
            self.bound
        )
    }
}
