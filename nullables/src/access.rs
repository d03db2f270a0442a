//! Nullable access control: an in-memory role table.

use crate::lock;
use oracle_types::{AccessControl, Address, Role};
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

/// Role table that can be edited from tests.
pub struct NullAccessControl {
    members: Mutex<HashMap<Role, BTreeSet<Address>>>,
}

impl NullAccessControl {
    pub fn new() -> Self {
        Self {
            members: Mutex::new(HashMap::new()),
        }
    }

    pub fn grant(&self, role: Role, who: &Address) {
        lock(&self.members)
            .entry(role)
            .or_default()
            .insert(who.clone());
    }

    pub fn revoke(&self, role: Role, who: &Address) {
        if let Some(set) = lock(&self.members).get_mut(&role) {
            set.remove(who);
        }
    }

    /// Builder-style grant.
    pub fn with(self, role: Role, who: &Address) -> Self {
        self.grant(role, who);
        self
    }
}

impl Default for NullAccessControl {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessControl for NullAccessControl {
    fn has_role(&self, role: Role, who: &Address) -> bool {
        lock(&self.members)
            .get(&role)
            .is_some_and(|set| set.contains(who))
    }

    fn role_member_count(&self, role: Role) -> u64 {
        lock(&self.members)
            .get(&role)
            .map_or(0, |set| set.len() as u64)
    }
}
