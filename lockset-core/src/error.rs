//! Custom error types for lockset.
//!
//! Explicit enum error types only. No `Box<dyn Error>`, no `anyhow::Result` in the library.
//! Negative operation outcomes (duplicate insert, absent delete) are not errors and never
//! appear here; they are reported through the counters.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Key;

/// Exit code for argument errors (wrong count, unparseable or out-of-range values).
///
/// Argument count and parse failures are raised by the command-line parser; values it accepts
/// but that are out of range surface as [`ConfigError::InvalidArgument`].
pub const EXIT_ARGUMENTS: i32 = 1;
/// Exit code for an operation mix that does not sum to 100.
pub const EXIT_MIX: i32 = 2;
/// Exit code for an unrecognized strategy name.
pub const EXIT_STRATEGY: i32 = 3;
/// Exit code for failures after validation succeeded.
pub const EXIT_RUNTIME: i32 = 4;

/// Top-level error type for lockset.
#[derive(Debug, Error)]
pub enum LocksetError {
    // =========================================================================
    // Configuration Errors - detected before any worker starts
    // =========================================================================
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // =========================================================================
    // Set Errors - structural invariants broken at a quiescent point
    // =========================================================================
    #[error("Set invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),

    #[error("Benchmark set must start empty, found {len} keys")]
    SetNotEmpty { len: usize },

    // =========================================================================
    // Worker Errors
    // =========================================================================
    #[error("Failed to spawn worker {index}: {source}")]
    WorkerSpawn {
        index: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Worker {index} panicked")]
    WorkerPanicked { index: usize },

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl LocksetError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(err) => err.exit_code(),
            _ => EXIT_RUNTIME,
        }
    }
}

/// Hard validation errors. The benchmark never starts when one of these is raised.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidArgument {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Percentages must sum to 100, got {sum}")]
    PercentageSum { sum: f64 },

    #[error("Percentage for {field} must not be negative, got {value}")]
    NegativePercentage { field: &'static str, value: f64 },

    #[error("Unknown strategy '{name}' (expected one of: coarse, fine, rw)")]
    UnknownStrategy { name: String },

    #[error("Plan file not found: {path}")]
    PlanNotFound { path: PathBuf },

    #[error("Plan parse error: {message}")]
    PlanParse { message: String },
}

impl ConfigError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::PercentageSum { .. } | Self::NegativePercentage { .. } => EXIT_MIX,
            Self::UnknownStrategy { .. } => EXIT_STRATEGY,
            _ => EXIT_ARGUMENTS,
        }
    }
}

/// A quiescent traversal that is not strictly ascending.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("keys out of order at position {position}: {previous} followed by {next}")]
    OutOfOrder {
        position: usize,
        previous: Key,
        next: Key,
    },

    #[error("duplicate key {key} at position {position}")]
    Duplicate { position: usize, key: Key },
}

/// Result type alias using LocksetError.
pub type LocksetResult<T> = Result<T, LocksetError>;
