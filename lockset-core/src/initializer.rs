// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Warm-up population of the shared set before timing starts.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::set::ConcurrentSet;
use crate::types::KeyMax;

/// Attempts allowed per requested key.
pub const RETRY_FACTOR: usize = 50;

/// What the initializer achieved. Missing the target is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulateOutcome {
    pub target: usize,
    pub inserted: usize,
    pub attempts: usize,
}

impl PopulateOutcome {
    pub fn reached_target(&self) -> bool {
        self.inserted >= self.target
    }
}

/// Insert uniformly drawn keys until `target` keys went in or `RETRY_FACTOR * target`
/// attempts were spent.
pub fn populate<R: Rng>(
    set: &dyn ConcurrentSet,
    target: usize,
    key_max: KeyMax,
    rng: &mut R,
) -> PopulateOutcome {
    let budget = target.saturating_mul(RETRY_FACTOR);
    let mut inserted = 0;
    let mut attempts = 0;

    while inserted < target && attempts < budget {
        if set.insert(rng.gen_range(0..=key_max.get())) {
            inserted += 1;
        }
        attempts += 1;
    }

    let outcome = PopulateOutcome {
        target,
        inserted,
        attempts,
    };
    if !outcome.reached_target() {
        tracing::debug!(
            target = target,
            inserted = inserted,
            attempts = attempts,
            "Retry budget exhausted; continuing with a smaller initial population"
        );
    }
    outcome
}
