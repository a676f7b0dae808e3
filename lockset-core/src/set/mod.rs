// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Concurrent ordered sets of integer keys.
//!
//! Three interchangeable implementations of one Member/Insert/Delete contract:
//! - [`CoarseSet`]: one mutex serializes every operation.
//! - [`FineSet`]: one mutex per node, traversed hand-over-hand.
//! - [`RwSet`]: one reader-writer lock, shared for Member and exclusive for Insert/Delete.

mod chain;
mod coarse;
mod fine;
mod rw;

pub use coarse::CoarseSet;
pub use fine::FineSet;
pub use rw::RwSet;

use crate::error::InvariantViolation;
use crate::types::{Key, Strategy};

/// Ordered set of unique keys shared by all workers.
///
/// `member`, `insert` and `delete` are linearizable. `snapshot` is only meaningful at a
/// quiescent point (no operation in flight).
pub trait ConcurrentSet: Send + Sync {
    /// Whether `key` is present.
    fn member(&self, key: Key) -> bool;

    /// Add `key`. Returns `false` if it was already present.
    fn insert(&self, key: Key) -> bool;

    /// Remove `key`. Returns `false` if it was absent.
    fn delete(&self, key: Key) -> bool;

    /// Keys in traversal order.
    fn snapshot(&self) -> Vec<Key>;

    /// Strategy guarding this set.
    fn strategy(&self) -> Strategy;

    /// Number of keys, by traversal.
    fn len(&self) -> usize {
        self.snapshot().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Verify the chain is strictly ascending. Returns the number of keys.
    fn check_invariants(&self) -> Result<usize, InvariantViolation> {
        let keys = self.snapshot();
        check_ascending(&keys)?;
        Ok(keys.len())
    }
}

/// Check that `keys` is strictly ascending (sorted, no duplicates).
pub fn check_ascending(keys: &[Key]) -> Result<(), InvariantViolation> {
    for (position, pair) in keys.windows(2).enumerate() {
        let (previous, next) = (pair[0], pair[1]);
        if previous == next {
            return Err(InvariantViolation::Duplicate {
                position: position + 1,
                key: next,
            });
        }
        if previous > next {
            return Err(InvariantViolation::OutOfOrder {
                position: position + 1,
                previous,
                next,
            });
        }
    }
    Ok(())
}

impl Strategy {
    /// Build an empty set guarded by this strategy.
    pub fn build(&self) -> Box<dyn ConcurrentSet> {
        match self {
            Self::Coarse => Box::new(CoarseSet::new()),
            Self::Fine => Box::new(FineSet::new()),
            Self::ReadWrite => Box::new(RwSet::new()),
        }
    }
}
