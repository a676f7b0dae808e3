// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Reader-writer set: Member runs under shared access, Insert/Delete under exclusive access.

use parking_lot::RwLock;

use super::chain::Chain;
use super::ConcurrentSet;
use crate::types::{Key, Strategy};

/// Set guarded by one reader-writer lock. Any number of Members proceed together.
pub struct RwSet {
    chain: RwLock<Chain>,
}

impl RwSet {
    pub fn new() -> Self {
        Self {
            chain: RwLock::new(Chain::new()),
        }
    }
}

impl Default for RwSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ConcurrentSet for RwSet {
    fn member(&self, key: Key) -> bool {
        self.chain.read().contains(key)
    }

    fn insert(&self, key: Key) -> bool {
        self.chain.write().insert(key)
    }

    fn delete(&self, key: Key) -> bool {
        self.chain.write().remove(key)
    }

    fn snapshot(&self) -> Vec<Key> {
        self.chain.read().keys()
    }

    fn strategy(&self) -> Strategy {
        Strategy::ReadWrite
    }
}
