//! lockset Core Library
//!
//! Concurrent ordered sets of integer keys under three synchronization disciplines
//! (global mutex, per-node lock coupling, reader-writer lock), together with the
//! workload generator and driver used to benchmark them.

pub mod config;
pub mod counters;
pub mod driver;
pub mod error;
pub mod initializer;
pub mod set;
pub mod types;
pub mod workload;

// Re-export commonly used types
pub use config::{BenchConfig, BenchPlan, ConfigLoader, RawBenchConfig, Scenario};
pub use counters::{CounterSnapshot, Counters, OpTally};
pub use driver::{BenchmarkDriver, RunReport};
pub use error::{ConfigError, InvariantViolation, LocksetError, LocksetResult};
pub use initializer::{populate, PopulateOutcome};
pub use set::{CoarseSet, ConcurrentSet, FineSet, RwSet};
pub use types::{Key, KeyMax, OpKind, OperationMix, Strategy, ThreadCount};
pub use workload::WorkloadGenerator;
