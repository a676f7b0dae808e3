// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Validate the arguments, run the benchmark, print the report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use lockset_core::{BenchConfig, BenchmarkDriver, LocksetError, RawBenchConfig, RunReport};

use crate::error::CliError;
use crate::Cli;

pub fn execute(cli: &Cli) -> Result<(), CliError> {
    let config = BenchConfig::validate(RawBenchConfig {
        strategy: cli.strategy.clone(),
        threads: cli.threads,
        ops_per_thread: cli.ops_per_thread,
        member_pct: cli.member_pct,
        insert_pct: cli.insert_pct,
        delete_pct: cli.delete_pct,
        initial_size: cli.initial_size,
        key_max: cli.key_max,
        seed: cli.seed,
    })
    .map_err(LocksetError::from)?;

    tracing::debug!(strategy = %config.strategy, "Configuration validated");

    let report = BenchmarkDriver::new(config).run()?;
    println!("{}", report);

    if let Some(path) = &cli.json {
        write_json(&report, path)?;
        tracing::info!(path = %path.display(), "Report written");
    }

    Ok(())
}

fn write_json(report: &RunReport, path: &Path) -> Result<(), CliError> {
    let file = File::create(path).map_err(|source| CliError::Output {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush().map_err(|source| CliError::Output {
        path: path.to_path_buf(),
        source,
    })
}
