//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};

use oracle_ledger::{StoreConfig, DEFAULT_FINALIZATION_DELAY_BLOCKS};
use oracle_types::{Address, BoundsParams, QuorumParams, Record};

use crate::NodeError;

/// Configuration for an oracle node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Identity the quorum aggregator submits records under.
    #[serde(default = "default_aggregator")]
    pub aggregator: Address,

    /// Designated submitter of the record store. Defaults to the aggregator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updater: Option<Address>,

    /// Blocks that must pass after a period ends before it is accepted.
    #[serde(default = "default_finalization_delay")]
    pub finalization_delay_blocks: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Plausibility limits.
    #[serde(default)]
    pub bounds: BoundsParams,

    /// Quorum thresholds.
    #[serde(default)]
    pub quorum: QuorumParams,

    /// Record 0 of the sequence.
    #[serde(default)]
    pub genesis: Record,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_aggregator() -> Address {
    Address::new("0x0a66")
}

fn default_finalization_delay() -> u64 {
    DEFAULT_FINALIZATION_DELAY_BLOCKS
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// The designated submitter in effect.
    pub fn effective_updater(&self) -> &Address {
        self.updater.as_ref().unwrap_or(&self.aggregator)
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            updater: self.effective_updater().clone(),
            finalization_delay_blocks: self.finalization_delay_blocks,
            bounds: self.bounds.clone(),
        }
    }

    /// Range-check everything the runtime setters would check.
    pub fn validate(&self) -> Result<(), NodeError> {
        if !self.aggregator.is_valid() {
            return Err(NodeError::Config(format!(
                "malformed aggregator identity {}",
                self.aggregator
            )));
        }
        if self.quorum.relative_threshold_bps as u64 > oracle_types::BASIS_POINTS_DENOMINATOR {
            return Err(NodeError::Config(format!(
                "relative quorum threshold {} bps exceeds 10000",
                self.quorum.relative_threshold_bps
            )));
        }
        self.store_config().validate()?;
        Ok(())
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            aggregator: default_aggregator(),
            updater: None,
            finalization_delay_blocks: default_finalization_delay(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            bounds: BoundsParams::default(),
            quorum: QuorumParams::default(),
            genesis: Record::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oracle_types::WEI_PER_ETH;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = NodeConfig::default();
        let toml_str = config.to_toml_string().expect("serializable");
        let parsed = NodeConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = NodeConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.finalization_delay_blocks, 64);
        assert_eq!(config.log_format, "human");
        assert_eq!(config.effective_updater(), &config.aggregator);
        assert_eq!(config.bounds.min_deposit_per_validator, 32 * WEI_PER_ETH);
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            updater = "0xd1"
            finalization_delay_blocks = 10

            [quorum]
            absolute_threshold = 2
            relative_threshold_bps = 5000

            [genesis]
            update_start_block = 1
            update_end_block = 100
            total_validators_not_withdrawable = 32
            total_validators_withdrawable = 0
            window_withdrawn_principal_amount = "0"
            window_withdrawn_reward_amount = "0"
            total_validator_balance = "1024000000000000000000"
            total_processed_deposit = "1024000000000000000000"
        "#;
        let config = NodeConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.effective_updater(), &Address::new("0xd1"));
        assert_eq!(config.quorum.absolute_threshold, 2);
        assert_eq!(config.quorum.target_report_window_blocks, 50_400);
        assert_eq!(config.genesis.total_validator_balance, 1024 * WEI_PER_ETH);
        assert_eq!(config.store_config().finalization_delay_blocks, 10);
    }

    #[test]
    fn out_of_range_values_fail_validation() {
        let config = NodeConfig {
            finalization_delay_blocks: 0,
            ..NodeConfig::default()
        };
        assert!(matches!(config.validate(), Err(NodeError::Ledger(_))));

        let mut config = NodeConfig::default();
        config.quorum.relative_threshold_bps = 10_001;
        assert!(matches!(config.validate(), Err(NodeError::Config(_))));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = NodeConfig::from_toml_file("/nonexistent/oracle.toml");
        assert!(matches!(result, Err(NodeError::Config(_))));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("oracle.toml");
        let config = NodeConfig {
            updater: Some(Address::new("0xbeef")),
            ..NodeConfig::default()
        };
        std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();
        let loaded = NodeConfig::from_toml_file(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded, config);
    }
}
