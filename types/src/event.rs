//! Audit events emitted by the record store and the quorum aggregator.

use crate::{Address, BoundViolation, Record, RecordHash};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration knobs that emit [`OracleEvent::ConfigChanged`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigField {
    FinalizationDelayBlocks,
    MinReportSizeBlocks,
    MinDepositPerValidator,
    MaxDepositPerValidator,
    MinGainPerBlockPpt,
    MaxGainPerBlockPpt,
    MaxLossPpm,
    Updater,
    QuorumThresholds,
    TargetReportWindowBlocks,
}

impl ConfigField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FinalizationDelayBlocks => "finalization_delay_blocks",
            Self::MinReportSizeBlocks => "min_report_size_blocks",
            Self::MinDepositPerValidator => "min_deposit_per_validator",
            Self::MaxDepositPerValidator => "max_deposit_per_validator",
            Self::MinGainPerBlockPpt => "min_gain_per_block_ppt",
            Self::MaxGainPerBlockPpt => "max_gain_per_block_ppt",
            Self::MaxLossPpm => "max_loss_ppm",
            Self::Updater => "updater",
            Self::QuorumThresholds => "quorum_thresholds",
            Self::TargetReportWindowBlocks => "target_report_window_blocks",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// New value carried by a config change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Number(u128),
    Address(Address),
    Thresholds { absolute: u64, relative_bps: u16 },
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Address(a) => write!(f, "{a}"),
            Self::Thresholds {
                absolute,
                relative_bps,
            } => write!(f, "{absolute} votes / {relative_bps} bps"),
        }
    }
}

/// Events observers can subscribe to via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OracleEvent {
    /// A record was appended at `index`.
    RecordAdded { index: usize, record: Record },
    /// A stored record was corrected in place.
    RecordModified { index: usize, record: Record },
    /// A candidate failed a plausibility check and was parked as pending.
    BoundViolation {
        violation: BoundViolation,
        record: Record,
    },
    /// The pending record was discarded by a resolver.
    PendingUpdateRejected { record: Record },
    /// A reporter's vote was received.
    VoteReceived {
        period: u64,
        reporter: Address,
        hash: RecordHash,
        record: Record,
    },
    /// A record hash reached quorum and is about to be forwarded.
    QuorumReached { period: u64, hash: RecordHash },
    /// Forwarding a quorum record to the store failed.
    ForwardFailed { period: u64, reason: String },
    /// A configuration value changed.
    ConfigChanged {
        field: ConfigField,
        value: ConfigValue,
    },
}

type Listener = Box<dyn Fn(&OracleEvent) + Send + Sync>;

/// Synchronous fan-out event bus.
///
/// Listeners run inline on the emitting call; keep handlers fast.
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &OracleEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
