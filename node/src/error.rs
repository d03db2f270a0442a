use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("ledger error: {0}")]
    Ledger(#[from] oracle_ledger::LedgerError),

    #[error("consensus error: {0}")]
    Consensus(#[from] oracle_consensus::ConsensusError),

    #[error("metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("config error: {0}")]
    Config(String),
}
