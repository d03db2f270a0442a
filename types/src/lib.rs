//! Fundamental types for the staking oracle.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! oracle records, identities, content hashes, roles and the access-control seam,
//! bound and quorum parameters, bound violations, collaborator interfaces, and
//! the audit event stream.

pub mod address;
pub mod amount;
pub mod collaborator;
pub mod event;
pub mod hash;
pub mod params;
pub mod record;
pub mod role;
pub mod violation;

pub use address::Address;
pub use amount::WEI_PER_ETH;
pub use collaborator::{ChainHeight, PauseControl, Settlement, SettlementError, ValidatorRegistry};
pub use event::{ConfigField, ConfigValue, EventBus, OracleEvent};
pub use hash::RecordHash;
pub use params::{BoundsParams, QuorumParams, BASIS_POINTS_DENOMINATOR, PPM_DENOMINATOR, PPT_DENOMINATOR};
pub use record::Record;
pub use role::{AccessControl, Role};
pub use violation::{BoundCheck, BoundViolation};
