// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Per-worker operation streams.
//!
//! Each worker owns its generator, so no random state is ever shared between threads.

use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{Key, KeyMax, OpKind, OperationMix};

/// Stride between consecutive worker seeds.
const SEED_STRIDE: u64 = 101;

/// Seed of worker `index` derived from the global seed.
pub fn worker_seed(global: u64, index: usize) -> u64 {
    global.wrapping_add(SEED_STRIDE.wrapping_mul(index as u64 + 1))
}

/// Deterministic stream of `(kind, key)` pairs.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    rng: StdRng,
    mix: OperationMix,
    keys: Uniform<Key>,
}

impl WorkloadGenerator {
    pub fn new(seed: u64, mix: OperationMix, key_max: KeyMax) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            mix,
            keys: Uniform::new_inclusive(0, key_max.get()),
        }
    }

    /// Generator for worker `index` of a run seeded with `global`.
    pub fn for_worker(global: u64, index: usize, mix: OperationMix, key_max: KeyMax) -> Self {
        Self::new(worker_seed(global, index), mix, key_max)
    }

    /// Draw the selector, then the key, for the next operation.
    pub fn next_op(&mut self) -> (OpKind, Key) {
        let selector: f64 = self.rng.gen();
        let key = self.rng.sample(self.keys);
        (self.mix.classify(selector), key)
    }
}

impl Iterator for WorkloadGenerator {
    type Item = (OpKind, Key);

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_op())
    }
}
