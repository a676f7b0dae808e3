// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Standardized metrics types for benchmark results.
//!
//! This module defines the data structures used to capture and serialize
//! repeated benchmark runs of one configuration.

use chrono::{DateTime, Utc};
use lockset_core::{BenchConfig, CounterSnapshot, RunReport, Strategy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use sysinfo::{CpuRefreshKind, RefreshKind, System};

/// Duration statistics over repeated runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyMetrics {
    /// Fastest run in nanoseconds
    pub min_ns: u64,
    /// Slowest run in nanoseconds
    pub max_ns: u64,
    /// Arithmetic mean in nanoseconds
    pub mean_ns: f64,
    /// Median (p50) in nanoseconds
    pub median_ns: u64,
    /// 95th percentile in nanoseconds
    pub p95_ns: u64,
    /// 99th percentile in nanoseconds
    pub p99_ns: u64,
    /// Standard deviation in nanoseconds
    pub std_dev_ns: f64,
    /// Raw sample data for visualization (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples: Option<Vec<u64>>,
}

impl LatencyMetrics {
    /// Calculate metrics from a vector of duration samples (in nanoseconds).
    pub fn from_samples(mut samples: Vec<u64>, keep_raw: bool) -> Self {
        if samples.is_empty() {
            return Self {
                min_ns: 0,
                max_ns: 0,
                mean_ns: 0.0,
                median_ns: 0,
                p95_ns: 0,
                p99_ns: 0,
                std_dev_ns: 0.0,
                samples: None,
            };
        }

        samples.sort_unstable();
        let len = samples.len();

        let min_ns = samples[0];
        let max_ns = samples[len - 1];
        let sum: u64 = samples.iter().sum();
        let mean_ns = sum as f64 / len as f64;
        let median_ns = samples[len / 2];
        let p95_ns = samples[((len as f64 * 0.95) as usize).min(len - 1)];
        let p99_ns = samples[((len as f64 * 0.99) as usize).min(len - 1)];

        let variance: f64 = samples
            .iter()
            .map(|&x| {
                let diff = x as f64 - mean_ns;
                diff * diff
            })
            .sum::<f64>()
            / len as f64;
        let std_dev_ns = variance.sqrt();

        Self {
            min_ns,
            max_ns,
            mean_ns,
            median_ns,
            p95_ns,
            p99_ns,
            std_dev_ns,
            samples: keep_raw.then_some(samples),
        }
    }

    /// Format a duration in human-readable form (auto-selects ns/μs/ms/s).
    pub fn format_latency(ns: u64) -> String {
        if ns < 1_000 {
            format!("{}ns", ns)
        } else if ns < 1_000_000 {
            format!("{:.2}μs", ns as f64 / 1_000.0)
        } else if ns < 1_000_000_000 {
            format!("{:.2}ms", ns as f64 / 1_000_000.0)
        } else {
            format!("{:.2}s", ns as f64 / 1_000_000_000.0)
        }
    }
}

/// Aggregate throughput over repeated runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThroughputMetrics {
    /// Operations per second over all runs
    pub ops_per_sec: f64,
    /// Total operations executed
    pub total_operations: u64,
    /// Total measured time in nanoseconds
    pub duration_ns: u64,
}

impl ThroughputMetrics {
    /// Calculate throughput from an operation count and duration.
    pub fn calculate(operations: u64, duration_ns: u64) -> Self {
        let duration_secs = duration_ns as f64 / 1_000_000_000.0;
        let ops_per_sec = if duration_secs > 0.0 {
            operations as f64 / duration_secs
        } else {
            0.0
        };
        Self {
            ops_per_sec,
            total_operations: operations,
            duration_ns,
        }
    }

    /// Format a rate in human-readable form.
    pub fn format_ops_per_sec(ops: f64) -> String {
        if ops < 1_000.0 {
            format!("{:.2} ops/s", ops)
        } else if ops < 1_000_000.0 {
            format!("{:.2} Kops/s", ops / 1_000.0)
        } else {
            format!("{:.2} Mops/s", ops / 1_000_000.0)
        }
    }
}

/// Host the benchmark ran on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system name and version
    pub os: String,
    pub cpu_model: String,
    /// Logical CPUs available to the worker pool
    pub cpu_cores: usize,
}

impl SystemInfo {
    pub fn collect() -> Self {
        let sys =
            System::new_with_specifics(RefreshKind::new().with_cpu(CpuRefreshKind::everything()));

        let os = match (System::name(), System::os_version()) {
            (Some(name), Some(version)) => format!("{} {}", name, version),
            (Some(name), None) => name,
            _ => "unknown".to_string(),
        };
        let cpu_model = sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        Self {
            os,
            cpu_model,
            cpu_cores: sys.cpus().len(),
        }
    }
}

impl std::fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {} ({} cores)", self.os, self.cpu_model, self.cpu_cores)
    }
}

/// Results of repeated runs of one configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Name of the benchmark (scenario, strategy and threads)
    pub name: String,
    /// Scenario this run belongs to
    pub scenario: String,
    /// Strategy under test
    pub strategy: Strategy,
    /// Configuration of every repetition
    pub config: BenchConfig,
    /// Run duration statistics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency: Option<LatencyMetrics>,
    /// Aggregate throughput
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throughput: Option<ThroughputMetrics>,
    /// Counters of the last repetition
    pub counters: CounterSnapshot,
    /// Number of measured repetitions
    pub iterations: u64,
    /// Additional metadata specific to this benchmark
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl BenchmarkResult {
    /// Build a result from measured repetitions. Returns `None` when `runs` is empty.
    pub fn from_runs(scenario: impl Into<String>, runs: &[RunReport], keep_raw: bool) -> Option<Self> {
        let last = runs.last()?;
        let scenario = scenario.into();
        let config = last.config.clone();

        let samples: Vec<u64> = runs.iter().map(|r| r.elapsed.as_nanos() as u64).collect();
        let total_ns = samples.iter().sum();
        let total_ops = runs.iter().map(|r| r.counters.total_attempted()).sum();

        Some(Self {
            name: format!("{}_{}_t{}", scenario, config.strategy, config.threads),
            scenario,
            strategy: config.strategy,
            config,
            latency: Some(LatencyMetrics::from_samples(samples, keep_raw)),
            throughput: Some(ThroughputMetrics::calculate(total_ops, total_ns)),
            counters: last.counters,
            iterations: runs.len() as u64,
            metadata: HashMap::new(),
        })
    }

    /// Add metadata to the result.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(value) = serde_json::to_value(value) {
            self.metadata.insert(key.into(), value);
        }
        self
    }
}

/// Complete benchmark suite report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Suite identifier
    pub benchmark_suite: String,
    /// Framework version
    pub version: String,
    /// Timestamp when benchmarks were run
    pub timestamp: DateTime<Utc>,
    /// System information
    pub system_info: SystemInfo,
    /// Individual benchmark results
    pub results: Vec<BenchmarkResult>,
}

impl BenchmarkReport {
    /// Create a new benchmark report.
    pub fn new() -> Self {
        Self {
            benchmark_suite: "lockset-benchmarks".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            system_info: SystemInfo::collect(),
            results: Vec::new(),
        }
    }

    /// Add a result to the report.
    pub fn add_result(&mut self, result: BenchmarkResult) {
        self.results.push(result);
    }
}

impl Default for BenchmarkReport {
    fn default() -> Self {
        Self::new()
    }
}
