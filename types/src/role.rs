//! Roles and the access-control seam.
//!
//! Components only ask "may this identity act as this role"; how role
//! membership is stored is the provider's business.

use crate::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named capabilities an identity can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Tunes record-store parameters and the designated submitter.
    OracleManager,
    /// Accepts or rejects a record parked by a bound violation.
    PendingUpdateResolver,
    /// Corrects interior fields of an already accepted record. Unassigned by default.
    RecordModifier,
    /// Registered reporter allowed to vote on records.
    Reporter,
    /// Tunes quorum thresholds.
    QuorumManager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OracleManager => "oracle_manager",
            Self::PendingUpdateResolver => "pending_update_resolver",
            Self::RecordModifier => "record_modifier",
            Self::Reporter => "reporter",
            Self::QuorumManager => "quorum_manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only authorization provider.
pub trait AccessControl: Send + Sync {
    fn has_role(&self, role: Role, who: &Address) -> bool;

    /// Number of identities currently holding `role`.
    fn role_member_count(&self, role: Role) -> u64;
}
