//! Per-period vote bookkeeping.
//!
//! Each reporter holds at most one vote per period. Re-voting moves the
//! reporter's weight from the old hash to the new one, so the sum of all
//! counts for a period always equals the number of distinct reporters who
//! have voted in it.

use oracle_types::{Address, RecordHash};
use std::collections::{BTreeMap, HashMap};

/// What a vote did to the tally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteChange {
    /// First vote by this reporter for the period.
    First,
    /// Same hash as the reporter's previous vote; nothing changed.
    Unchanged,
    /// Weight moved from `from` to the new hash.
    Moved { from: RecordHash },
}

#[derive(Default)]
struct PeriodVotes {
    by_reporter: HashMap<Address, RecordHash>,
    counts: HashMap<RecordHash, u64>,
}

/// Votes keyed by period end block.
#[derive(Default)]
pub struct VoteTally {
    periods: BTreeMap<u64, PeriodVotes>,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_vote(&mut self, period: u64, reporter: &Address, hash: RecordHash) -> VoteChange {
        let votes = self.periods.entry(period).or_default();

        let change = match votes.by_reporter.get(reporter) {
            Some(previous) if *previous == hash => return VoteChange::Unchanged,
            Some(previous) => VoteChange::Moved { from: *previous },
            None => VoteChange::First,
        };

        if let VoteChange::Moved { from } = change {
            if let Some(count) = votes.counts.get_mut(&from) {
                *count -= 1;
                if *count == 0 {
                    votes.counts.remove(&from);
                }
            }
        }
        *votes.counts.entry(hash).or_insert(0) += 1;
        votes.by_reporter.insert(reporter.clone(), hash);
        change
    }

    /// The reporter's current vote for a period.
    pub fn vote_of(&self, period: u64, reporter: &Address) -> Option<RecordHash> {
        self.periods
            .get(&period)
            .and_then(|votes| votes.by_reporter.get(reporter).copied())
    }

    pub fn count(&self, period: u64, hash: &RecordHash) -> u64 {
        self.periods
            .get(&period)
            .and_then(|votes| votes.counts.get(hash).copied())
            .unwrap_or(0)
    }

    /// Sum of all counts for a period.
    pub fn total_votes(&self, period: u64) -> u64 {
        self.periods
            .get(&period)
            .map_or(0, |votes| votes.counts.values().sum())
    }

    /// Number of distinct reporters who voted in a period.
    pub fn voters(&self, period: u64) -> usize {
        self.periods
            .get(&period)
            .map_or(0, |votes| votes.by_reporter.len())
    }
}
