//! Oracle record: one period of validator-pool state.

use crate::amount::decimal;
use serde::{Deserialize, Serialize};

/// A periodic report on the validator pool.
///
/// `update_start_block..=update_end_block` is the covered period. Validator
/// counts and `total_processed_deposit` are cumulative; the two `window_*`
/// amounts cover this period only; `total_validator_balance` is a
/// point-in-time figure at the end of the period.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub update_start_block: u64,
    pub update_end_block: u64,
    pub total_validators_not_withdrawable: u64,
    pub total_validators_withdrawable: u64,
    #[serde(with = "decimal")]
    pub window_withdrawn_principal_amount: u128,
    #[serde(with = "decimal")]
    pub window_withdrawn_reward_amount: u128,
    #[serde(with = "decimal")]
    pub total_validator_balance: u128,
    #[serde(with = "decimal")]
    pub total_processed_deposit: u128,
}

impl Record {
    /// Size of [`Record::canonical_bytes`] output.
    pub const ENCODED_LEN: usize = 4 * 8 + 4 * 16;

    /// Number of blocks covered, counting both ends.
    pub fn period_len(&self) -> u64 {
        self.update_end_block
            .saturating_sub(self.update_start_block)
            .saturating_add(1)
    }

    /// Withdrawable plus not-withdrawable validators.
    pub fn total_validators(&self) -> u128 {
        self.total_validators_not_withdrawable as u128 + self.total_validators_withdrawable as u128
    }

    /// Whether `other` covers exactly the same block range.
    pub fn same_period(&self, other: &Record) -> bool {
        self.update_start_block == other.update_start_block
            && self.update_end_block == other.update_end_block
    }

    /// Fixed-width encoding used for content hashing.
    ///
    /// Format: every field big-endian, in declaration order.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(Self::ENCODED_LEN);
        data.extend_from_slice(&self.update_start_block.to_be_bytes());
        data.extend_from_slice(&self.update_end_block.to_be_bytes());
        data.extend_from_slice(&self.total_validators_not_withdrawable.to_be_bytes());
        data.extend_from_slice(&self.total_validators_withdrawable.to_be_bytes());
        data.extend_from_slice(&self.window_withdrawn_principal_amount.to_be_bytes());
        data.extend_from_slice(&self.window_withdrawn_reward_amount.to_be_bytes());
        data.extend_from_slice(&self.total_validator_balance.to_be_bytes());
        data.extend_from_slice(&self.total_processed_deposit.to_be_bytes());
        data
    }
}
