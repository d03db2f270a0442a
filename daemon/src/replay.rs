//! Deterministic replay of a report script against in-memory collaborators.
//!
//! A script grants roles, seeds the validator registry and the chain
//! height, then runs a list of steps. Large amounts should be written as
//! decimal strings since JSON numbers above `u64::MAX` lose precision.

use std::sync::Arc;

use anyhow::Context;
use serde::Deserialize;

use oracle_ledger::Collaborators;
use oracle_node::{NodeConfig, OracleNode};
use oracle_nullables::{
    EventRecorder, NullAccessControl, NullChain, NullPauser, NullSettlement,
    NullValidatorRegistry,
};
use oracle_types::amount::decimal;
use oracle_types::{Address, EventBus, OracleEvent, Record, Role};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default)]
    pub grants: Vec<Grant>,
    #[serde(default)]
    pub registry: RegistryState,
    #[serde(default)]
    pub chain_height: u64,
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
pub struct Grant {
    pub role: Role,
    pub address: Address,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RegistryState {
    #[serde(with = "decimal")]
    pub total_deposited: u128,
    pub initiated_validators: u64,
}

impl Default for RegistryState {
    fn default() -> Self {
        Self {
            total_deposited: u128::MAX,
            initiated_validators: u64::MAX,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Report { reporter: Address, record: Record },
    AcceptPending { caller: Address },
    RejectPending { caller: Address },
    Modify {
        caller: Address,
        index: usize,
        record: Record,
    },
    SetBlock { height: u64 },
    AdvanceBlocks { blocks: u64 },
    SetPaused { paused: bool },
    SetSettlementFailing { failing: bool },
}

/// A refused step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub step: usize,
    pub reason: String,
}

pub struct Replay {
    pub node: OracleNode,
    pub events: Vec<OracleEvent>,
    pub failures: Vec<StepFailure>,
}

impl Script {
    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        serde_json::from_str(s).context("malformed replay script")
    }
}

/// Run every step; a refused step is recorded and the replay continues.
pub fn run(config: &NodeConfig, script: Script) -> anyhow::Result<Replay> {
    let access = Arc::new(NullAccessControl::new());
    for grant in &script.grants {
        access.grant(grant.role, &grant.address);
    }
    let chain = Arc::new(NullChain::new(script.chain_height));
    let pauser = Arc::new(NullPauser::new());
    let settlement = Arc::new(NullSettlement::new());
    let collaborators = Collaborators {
        access,
        registry: Arc::new(NullValidatorRegistry::new(
            script.registry.total_deposited,
            script.registry.initiated_validators,
        )),
        settlement: settlement.clone(),
        pauser: pauser.clone(),
        chain: chain.clone(),
    };

    let recorder = EventRecorder::new();
    let mut bus = EventBus::new();
    recorder.attach(&mut bus);
    let mut node = OracleNode::new(config, collaborators, bus)?;

    let mut failures = Vec::new();
    for (step, action) in script.steps.into_iter().enumerate() {
        let result = match action {
            Step::Report { reporter, record } => {
                node.submit_report(&reporter, record).map(|_| ())
            }
            Step::AcceptPending { caller } => node.accept_pending(&caller).map(|_| ()),
            Step::RejectPending { caller } => node.reject_pending(&caller).map(|_| ()),
            Step::Modify {
                caller,
                index,
                record,
            } => node.modify_record(&caller, index, record),
            Step::SetBlock { height } => {
                chain.set(height);
                Ok(())
            }
            Step::AdvanceBlocks { blocks } => {
                chain.advance(blocks);
                Ok(())
            }
            Step::SetPaused { paused } => {
                pauser.set_paused(paused);
                Ok(())
            }
            Step::SetSettlementFailing { failing } => {
                settlement.set_failing(failing);
                Ok(())
            }
        };
        if let Err(e) = result {
            tracing::warn!(step, "step refused: {e}");
            failures.push(StepFailure {
                step,
                reason: e.to_string(),
            });
        }
    }

    tracing::info!(
        records = node.store().records_number(),
        pending = node.store().has_pending_update(),
        refused = failures.len(),
        "replay finished"
    );
    Ok(Replay {
        node,
        events: recorder.events(),
        failures,
    })
}
