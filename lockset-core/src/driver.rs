// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark driver.
//!
//! Builds the configured set, populates it, runs a fixed pool of workers against it and
//! reports timing and counters. The set and the counters are owned here and lent to the
//! workers by shared reference for the duration of a scoped run.

use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config::BenchConfig;
use crate::counters::{CounterSnapshot, Counters};
use crate::error::{LocksetError, LocksetResult};
use crate::initializer::{populate, PopulateOutcome};
use crate::set::ConcurrentSet;
use crate::types::{OpKind, Strategy};
use crate::workload::WorkloadGenerator;

/// Outcome of one benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub config: BenchConfig,
    pub initial: PopulateOutcome,
    pub elapsed: Duration,
    pub counters: CounterSnapshot,
    /// Keys left in the set after all workers finished.
    pub final_size: usize,
}

impl RunReport {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Completed operations per second, over all workers.
    pub fn ops_per_sec(&self) -> f64 {
        let secs = self.elapsed_secs();
        if secs > 0.0 {
            self.counters.total_attempted() as f64 / secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Multithreaded linked list ({}) ===",
            self.config.strategy
        )?;
        writeln!(f, "{}", self.config)?;
        writeln!(f, "Total time: {:.3} s", self.elapsed_secs())?;
        let results: Vec<String> = OpKind::ALL
            .iter()
            .map(|&kind| {
                let tally = self.counters.get(kind);
                format!("{} {}/{}", kind, tally.succeeded, tally.attempted)
            })
            .collect();
        writeln!(f, "Results: {}", results.join(", "))?;
        writeln!(f, "Throughput: {:.0} ops/s", self.ops_per_sec())?;
        write!(
            f,
            "Set size: {} initial, {} final",
            self.initial.inserted, self.final_size
        )
    }
}

/// Runs one validated configuration.
#[derive(Debug, Clone)]
pub struct BenchmarkDriver {
    config: BenchConfig,
}

impl BenchmarkDriver {
    pub fn new(config: BenchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Run on a fresh set of the configured strategy.
    pub fn run(&self) -> LocksetResult<RunReport> {
        let set = self.config.strategy.build();
        self.run_on(set.as_ref())
    }

    /// Run on a caller-provided empty set.
    ///
    /// The configured strategy is replaced by the set's own in the report.
    pub fn run_on(&self, set: &dyn ConcurrentSet) -> LocksetResult<RunReport> {
        let config = &self.config;
        let strategy = set.strategy();

        let len = set.len();
        if len != 0 {
            return Err(LocksetError::SetNotEmpty { len });
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let initial = populate(set, config.initial_size, config.key_max, &mut rng);
        tracing::debug!(
            strategy = %strategy,
            inserted = initial.inserted,
            attempts = initial.attempts,
            "Set populated"
        );

        let counters = Counters::new();
        tracing::info!(
            strategy = %strategy,
            threads = config.threads.get(),
            ops_per_thread = config.ops_per_thread,
            "Starting benchmark run"
        );

        let start = Instant::now();
        run_workers(set, &counters, config)?;
        let elapsed = start.elapsed();

        let counters = counters.snapshot();
        let final_size = set.check_invariants()?;

        tracing::info!(
            strategy = %strategy,
            elapsed_ms = elapsed.as_millis() as u64,
            operations = counters.total_attempted(),
            final_size = final_size,
            "Benchmark run finished"
        );

        Ok(RunReport {
            config: BenchConfig {
                strategy,
                ..config.clone()
            },
            initial,
            elapsed,
            counters,
            final_size,
        })
    }
}

/// Convenience wrapper: run `config` once on a fresh set.
pub fn run(config: &BenchConfig) -> LocksetResult<RunReport> {
    BenchmarkDriver::new(config.clone()).run()
}

/// Spawn exactly `threads` workers, wait for all of them.
fn run_workers(
    set: &dyn ConcurrentSet,
    counters: &Counters,
    config: &BenchConfig,
) -> LocksetResult<()> {
    thread::scope(|scope| -> LocksetResult<()> {
        let mut handles = Vec::with_capacity(config.threads.get());
        for index in 0..config.threads.get() {
            let generator =
                WorkloadGenerator::for_worker(config.seed, index, config.mix, config.key_max);
            let ops = config.ops_per_thread;
            let handle = thread::Builder::new()
                .name(format!("lockset-worker-{}", index))
                .spawn_scoped(scope, move || worker(set, counters, generator, ops))
                .map_err(|source| LocksetError::WorkerSpawn { index, source })?;
            handles.push(handle);
        }

        // Join every worker before reporting, so no panic is left unobserved.
        let mut outcome = Ok(());
        for (index, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() && outcome.is_ok() {
                outcome = Err(LocksetError::WorkerPanicked { index });
            }
        }
        outcome
    })
}

/// Body of one worker: apply `ops` generated operations to the shared set.
fn worker(
    set: &dyn ConcurrentSet,
    counters: &Counters,
    mut generator: WorkloadGenerator,
    ops: u64,
) {
    for _ in 0..ops {
        let (kind, key) = generator.next_op();
        let success = match kind {
            OpKind::Member => set.member(key),
            OpKind::Insert => set.insert(key),
            OpKind::Delete => set.delete(key),
        };
        counters.record(kind, success);
    }
    let current = thread::current();
    tracing::debug!(
        thread = current.name().unwrap_or("worker"),
        ops = ops,
        "Worker finished"
    );
}

impl Strategy {
    /// Run `config` with this strategy instead of the configured one.
    pub fn run(&self, config: &BenchConfig) -> LocksetResult<RunReport> {
        let set = self.build();
        BenchmarkDriver::new(config.clone()).run_on(set.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawBenchConfig;

    fn config(strategy: &str, threads: usize, ops: u64, mix: (f64, f64, f64)) -> BenchConfig {
        BenchConfig::validate(RawBenchConfig {
            strategy: strategy.to_string(),
            threads,
            ops_per_thread: ops,
            member_pct: mix.0,
            insert_pct: mix.1,
            delete_pct: mix.2,
            initial_size: 100,
            key_max: 1000,
            seed: 42,
        })
        .unwrap()
    }

    #[test]
    fn test_attempted_matches_requested() {
        for strategy in ["coarse", "fine", "rw"] {
            let report = run(&config(strategy, 4, 500, (80.0, 10.0, 10.0))).unwrap();
            assert_eq!(report.counters.total_attempted(), 2000, "{strategy}");
        }
    }

    #[test]
    fn test_final_size_accounts_for_successes() {
        let report = run(&config("fine", 4, 2000, (20.0, 40.0, 40.0))).unwrap();
        let expected = report.initial.inserted as i64 + report.counters.net_growth();
        assert_eq!(report.final_size as i64, expected);
    }

    #[test]
    fn test_zero_operations() {
        let report = run(&config("coarse", 2, 0, (100.0, 0.0, 0.0))).unwrap();
        assert_eq!(report.counters.total_attempted(), 0);
        assert_eq!(report.final_size, report.initial.inserted);
    }

    #[test]
    fn test_single_thread_is_deterministic() {
        let cfg = config("coarse", 1, 5000, (50.0, 25.0, 25.0));
        let a = run(&cfg).unwrap();
        let b = run(&cfg).unwrap();
        assert_eq!(a.counters, b.counters);
        assert_eq!(a.final_size, b.final_size);

        // Same streams give the same results under every discipline.
        let fine = Strategy::Fine.run(&cfg).unwrap();
        assert_eq!(fine.counters, a.counters);
        assert_eq!(fine.config.strategy, Strategy::Fine);
    }

    #[test]
    fn test_run_on_rejects_populated_set() {
        let cfg = config("fine", 2, 100, (80.0, 10.0, 10.0));
        let set = Strategy::Fine.build();
        set.insert(7);
        set.insert(9);

        let err = BenchmarkDriver::new(cfg.clone()).run_on(set.as_ref()).unwrap_err();
        assert!(matches!(err, LocksetError::SetNotEmpty { len: 2 }));
        // Nothing ran against the set.
        assert_eq!(set.snapshot(), vec![7, 9]);

        let empty = Strategy::Coarse.build();
        let report = BenchmarkDriver::new(cfg).run_on(empty.as_ref()).unwrap();
        assert_eq!(report.config.strategy, Strategy::Coarse);
        assert_eq!(
            report.final_size as i64,
            report.initial.inserted as i64 + report.counters.net_growth()
        );
    }

    #[test]
    fn test_members_only_never_change_size() {
        let report = run(&config("rw", 4, 1000, (100.0, 0.0, 0.0))).unwrap();
        assert_eq!(report.counters.member.attempted, 4000);
        assert_eq!(report.counters.insert.attempted, 0);
        assert_eq!(report.final_size, report.initial.inserted);
    }

    #[test]
    fn test_report_display() {
        let report = run(&config("rw", 2, 10, (80.0, 10.0, 10.0))).unwrap();
        let text = report.to_string();
        assert!(text.contains("=== Multithreaded linked list (rw) ==="));
        assert!(text.contains("Total time: "));
        assert!(text.contains("Results: Member "));
        assert!(text.contains("Total: 20"));
    }

    #[test]
    fn test_report_serializes() {
        let report = run(&config("fine", 1, 10, (80.0, 10.0, 10.0))).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"strategy\":\"fine\""));
        assert!(json.contains("\"final_size\""));
    }
}
