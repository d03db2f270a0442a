//! Staking oracle node: wires the oracle components together.
//!
//! The node owns:
//! - The record store (canonical sequence, pending slot, bounds)
//! - The quorum aggregator feeding it
//! - The event bus both emit on
//! - Prometheus metrics derived from those events

pub mod config;
pub mod error;
pub mod metrics;
pub mod node;

pub use config::NodeConfig;
pub use error::NodeError;
pub use metrics::OracleMetrics;
pub use node::OracleNode;
