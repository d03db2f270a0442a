//! Identity of an actor (reporter, updater, manager) with a `0x` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An actor identity, always prefixed with `0x`.
///
/// Authorization is by registered identity only; no signature is attached.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// The standard prefix for all identities.
    pub const PREFIX: &'static str = "0x";

    /// Create a new address from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `0x`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "address must start with 0x");
        Self(s)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Well-formed means prefixed, non-empty, and hex after the prefix.
    pub fn is_valid(&self) -> bool {
        match self.0.strip_prefix(Self::PREFIX) {
            Some(rest) => !rest.is_empty() && rest.chars().all(|c| c.is_ascii_hexdigit()),
            None => false,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
