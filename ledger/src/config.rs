//! Record-store configuration and the range checks every setter shares.

use crate::error::LedgerError;
use oracle_types::{Address, BoundsParams, ConfigField, PPM_DENOMINATOR, PPT_DENOMINATOR};
use serde::{Deserialize, Serialize};

/// Blocks that must pass after a period ends before its record is accepted.
pub const DEFAULT_FINALIZATION_DELAY_BLOCKS: u64 = 64;

/// Upper bound on the finalization delay so intake cannot be deferred forever.
pub const MAX_FINALIZATION_DELAY_BLOCKS: u64 = 2048;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// The only identity allowed to submit records.
    pub updater: Address,
    pub finalization_delay_blocks: u64,
    pub bounds: BoundsParams,
}

impl StoreConfig {
    /// Default limits with `updater` as the designated submitter.
    pub fn new(updater: Address) -> Self {
        Self {
            updater,
            finalization_delay_blocks: DEFAULT_FINALIZATION_DELAY_BLOCKS,
            bounds: BoundsParams::default(),
        }
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        check_updater(&self.updater)?;
        check_finalization_delay(self.finalization_delay_blocks)?;
        check_min_report_size(self.bounds.min_report_size_blocks)?;
        check_deposit_range(
            ConfigField::MinDepositPerValidator,
            self.bounds.min_deposit_per_validator,
            self.bounds.max_deposit_per_validator,
        )?;
        check_gain_range(
            ConfigField::MinGainPerBlockPpt,
            self.bounds.min_gain_per_block_ppt,
            self.bounds.max_gain_per_block_ppt,
        )?;
        check_max_loss(self.bounds.max_loss_ppm)
    }
}

pub(crate) fn check_updater(updater: &Address) -> Result<(), LedgerError> {
    if !updater.is_valid() {
        return Err(LedgerError::invalid(
            ConfigField::Updater,
            format!("malformed identity {updater}"),
        ));
    }
    Ok(())
}

pub(crate) fn check_finalization_delay(blocks: u64) -> Result<(), LedgerError> {
    if blocks == 0 || blocks > MAX_FINALIZATION_DELAY_BLOCKS {
        return Err(LedgerError::invalid(
            ConfigField::FinalizationDelayBlocks,
            format!("{blocks} not in 1..={MAX_FINALIZATION_DELAY_BLOCKS}"),
        ));
    }
    Ok(())
}

pub(crate) fn check_min_report_size(blocks: u64) -> Result<(), LedgerError> {
    if blocks == 0 {
        return Err(LedgerError::invalid(
            ConfigField::MinReportSizeBlocks,
            "must be at least one block",
        ));
    }
    Ok(())
}

/// `field` names the side being changed; the error is reported against it.
pub(crate) fn check_deposit_range(
    field: ConfigField,
    min: u128,
    max: u128,
) -> Result<(), LedgerError> {
    if min > max {
        return Err(LedgerError::invalid(
            field,
            format!("min deposit {min} exceeds max deposit {max}"),
        ));
    }
    Ok(())
}

pub(crate) fn check_gain_range(field: ConfigField, min: u64, max: u64) -> Result<(), LedgerError> {
    for value in [min, max] {
        if value > PPT_DENOMINATOR {
            return Err(LedgerError::invalid(
                field,
                format!("{value} ppt exceeds {PPT_DENOMINATOR}"),
            ));
        }
    }
    if min > max {
        return Err(LedgerError::invalid(
            field,
            format!("min gain {min} ppt exceeds max gain {max} ppt"),
        ));
    }
    Ok(())
}

pub(crate) fn check_max_loss(ppm: u64) -> Result<(), LedgerError> {
    if ppm > PPM_DENOMINATOR {
        return Err(LedgerError::invalid(
            ConfigField::MaxLossPpm,
            format!("{ppm} ppm exceeds {PPM_DENOMINATOR}"),
        ));
    }
    Ok(())
}
