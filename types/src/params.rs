//! Tunable parameters of the bounds policy and the quorum aggregator.

use crate::amount::{decimal, WEI_PER_ETH};
use serde::{Deserialize, Serialize};

/// Denominator for parts-per-trillion rates.
pub const PPT_DENOMINATOR: u64 = 1_000_000_000_000;

/// Denominator for parts-per-million rates.
pub const PPM_DENOMINATOR: u64 = 1_000_000;

/// Denominator for basis-point fractions.
pub const BASIS_POINTS_DENOMINATOR: u64 = 10_000;

/// Plausibility limits applied to every candidate record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsParams {
    /// Minimum number of blocks a period must cover.
    pub min_report_size_blocks: u64,

    /// Minimum deposit per newly added validator (wei).
    #[serde(with = "decimal")]
    pub min_deposit_per_validator: u128,

    /// Maximum deposit per newly added validator (wei).
    #[serde(with = "decimal")]
    pub max_deposit_per_validator: u128,

    /// Guaranteed consensus-layer growth per block, parts per trillion.
    /// Default is roughly a tenth of the expected rate.
    pub min_gain_per_block_ppt: u64,

    /// Largest believable consensus-layer growth per block, parts per trillion.
    /// Default is roughly ten times the expected rate.
    pub max_gain_per_block_ppt: u64,

    /// Largest believable loss over a single period, parts per million.
    pub max_loss_ppm: u64,
}

impl BoundsParams {
    /// 6 hours of 12-second blocks.
    pub const DEFAULT_MIN_REPORT_SIZE_BLOCKS: u64 = 1_800;
}

impl Default for BoundsParams {
    fn default() -> Self {
        Self {
            min_report_size_blocks: Self::DEFAULT_MIN_REPORT_SIZE_BLOCKS,
            min_deposit_per_validator: 32 * WEI_PER_ETH,
            max_deposit_per_validator: 32 * WEI_PER_ETH,
            min_gain_per_block_ppt: 1_903,
            max_gain_per_block_ppt: 190_250,
            max_loss_ppm: 1_000,
        }
    }
}

/// Quorum thresholds for the aggregator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuorumParams {
    /// Minimum number of matching votes.
    pub absolute_threshold: u64,
    /// Minimum share of registered reporters, in basis points.
    pub relative_threshold_bps: u16,
    /// Period length reporters should aim for. Informational only.
    pub target_report_window_blocks: u64,
}

impl Default for QuorumParams {
    fn default() -> Self {
        Self {
            absolute_threshold: 1,
            relative_threshold_bps: 0,
            // one week of 12-second blocks
            target_report_window_blocks: 50_400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fractions_are_within_denominators() {
        let p = BoundsParams::default();
        assert!(p.min_gain_per_block_ppt <= p.max_gain_per_block_ppt);
        assert!(p.max_gain_per_block_ppt <= PPT_DENOMINATOR);
        assert!(p.max_loss_ppm <= PPM_DENOMINATOR);
        assert!(p.min_deposit_per_validator <= p.max_deposit_per_validator);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let p: BoundsParams = toml::from_str("max_loss_ppm = 5").unwrap();
        assert_eq!(p.max_loss_ppm, 5);
        assert_eq!(p.min_deposit_per_validator, 32 * WEI_PER_ETH);
    }
}
