//! Shared utilities for the staking oracle.

pub mod logging;

pub use logging::{init_tracing_with, LogFormat};
