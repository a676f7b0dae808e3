// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI error type.

use std::path::PathBuf;

use lockset_core::error::EXIT_RUNTIME;
use lockset_core::LocksetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Lockset(#[from] LocksetError),

    #[error("Failed to write report to {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Lockset(e) => e.exit_code(),
            _ => EXIT_RUNTIME,
        }
    }
}
