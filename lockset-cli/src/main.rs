// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! lockset CLI
//!
//! Runs one benchmark of a concurrent ordered set and prints the report.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use lockset_core::error::EXIT_ARGUMENTS;
use tracing_subscriber::EnvFilter;

mod error;
mod run;

/// lockset - benchmark a sorted linked list under coarse, fine-grained or reader-writer locking
#[derive(Parser, Debug)]
#[command(name = "lockset")]
#[command(author, version, about, long_about = None)]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// Locking strategy: coarse | fine | rw
    pub strategy: String,

    /// Number of worker threads
    pub threads: usize,

    /// Operations issued by each worker
    pub ops_per_thread: u64,

    /// Percentage of Member operations
    pub member_pct: f64,

    /// Percentage of Insert operations
    pub insert_pct: f64,

    /// Percentage of Delete operations
    pub delete_pct: f64,

    /// Keys inserted before timing starts
    pub initial_size: usize,

    /// Largest key drawn (keys are in 0..=key_max)
    pub key_max: i64,

    /// Global random seed
    pub seed: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Also write the run report as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => EXIT_ARGUMENTS,
            };
            let _ = err.print();
            return exit_code(code);
        }
    };

    // Initialize logging; stdout is reserved for the report.
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run::execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code(e.exit_code())
        }
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
