// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark harness for repeating and timing runs.
//!
//! A single benchmark run is noisy. The harness repeats it after a few discarded warmup
//! runs and hands back every measured result for statistical analysis.

use lockset_core::{BenchConfig, BenchmarkDriver, LocksetResult, RunReport};

/// A benchmark harness repeating an operation a fixed number of times.
pub struct BenchmarkHarness {
    /// Number of warmup runs before measurement
    warmup_iterations: u64,
    /// Number of measured runs
    measurement_iterations: u64,
}

impl BenchmarkHarness {
    /// Create a new benchmark harness with default settings.
    pub fn new() -> Self {
        Self {
            warmup_iterations: 1,
            measurement_iterations: 5,
        }
    }

    /// Set the number of warmup runs.
    pub fn warmup(mut self, iterations: u64) -> Self {
        self.warmup_iterations = iterations;
        self
    }

    /// Set the number of measured runs.
    pub fn iterations(mut self, iterations: u64) -> Self {
        self.measurement_iterations = iterations;
        self
    }

    pub fn measurement_iterations(&self) -> u64 {
        self.measurement_iterations
    }

    /// Run `operation` through warmup and measurement, stopping at the first error.
    ///
    /// Warmup results are discarded.
    pub fn run<T, E, F>(&self, mut operation: F) -> Result<Vec<T>, E>
    where
        F: FnMut() -> Result<T, E>,
    {
        for _ in 0..self.warmup_iterations {
            operation()?;
        }

        let mut samples = Vec::with_capacity(self.measurement_iterations as usize);
        for _ in 0..self.measurement_iterations {
            samples.push(operation()?);
        }
        Ok(samples)
    }

    /// Repeat a full benchmark run of `config`, each on a fresh set.
    pub fn run_config(&self, config: &BenchConfig) -> LocksetResult<Vec<RunReport>> {
        let driver = BenchmarkDriver::new(config.clone());
        self.run(|| driver.run())
    }
}

impl Default for BenchmarkHarness {
    fn default() -> Self {
        Self::new()
    }
}
