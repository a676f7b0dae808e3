// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! lockset Benchmarking Framework
//!
//! Runs sweeps of benchmark configurations over the three locking strategies and
//! records the results for later comparison.
//!
//! # Benchmark Dimensions
//!
//! - **Strategy**: coarse mutex, lock coupling, reader-writer lock
//! - **Threads**: worker pool size, to measure scaling under contention
//! - **Workload mix**: read-mostly versus write-heavy operation mixes
//!
//! # Data Output
//!
//! All runs are saved as JSON files with standardized metrics for visualization.

pub mod harness;
pub mod metrics;
pub mod reporter;

pub use harness::BenchmarkHarness;
pub use metrics::{BenchmarkReport, BenchmarkResult, LatencyMetrics, SystemInfo, ThroughputMetrics};
pub use reporter::JsonReporter;
