// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Coarse-grained set: a single mutex held for the whole of every operation.

use parking_lot::Mutex;

use super::chain::Chain;
use super::ConcurrentSet;
use crate::types::{Key, Strategy};

/// Baseline set. All operations, readers included, are fully serialized.
pub struct CoarseSet {
    chain: Mutex<Chain>,
}

impl CoarseSet {
    pub fn new() -> Self {
        Self {
            chain: Mutex::new(Chain::new()),
        }
    }
}

impl Default for CoarseSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ConcurrentSet for CoarseSet {
    fn member(&self, key: Key) -> bool {
        self.chain.lock().contains(key)
    }

    fn insert(&self, key: Key) -> bool {
        self.chain.lock().insert(key)
    }

    fn delete(&self, key: Key) -> bool {
        self.chain.lock().remove(key)
    }

    fn snapshot(&self) -> Vec<Key> {
        self.chain.lock().keys()
    }

    fn strategy(&self) -> Strategy {
        Strategy::Coarse
    }
}
