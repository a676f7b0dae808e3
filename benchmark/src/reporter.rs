// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! JSON report generation for benchmark results.
//!
//! Handles saving benchmark data to timestamped JSON files for later comparison.

use crate::metrics::BenchmarkReport;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%SZ";

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("Report I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// JSON reporter for benchmark results.
pub struct JsonReporter {
    output_dir: PathBuf,
}

impl JsonReporter {
    /// Create a new JSON reporter with the specified output directory.
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, ReporterError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Save a benchmark report to a JSON file named after its scenario.
    ///
    /// Reports spanning several scenarios are saved as `mixed`. Returns the path to the
    /// created file.
    pub fn save(&self, report: &BenchmarkReport) -> Result<PathBuf, ReporterError> {
        let mut scenarios = report.results.iter().map(|r| r.scenario.as_str());
        let label = match scenarios.next() {
            Some(first) if scenarios.all(|s| s == first) => first,
            _ => "mixed",
        };

        let filename = format!("{}_{}.json", label, report.timestamp.format(TIMESTAMP_FORMAT));
        self.write(&filename, report)
    }

    /// Save one report per strategy.
    pub fn save_by_strategy(&self, report: &BenchmarkReport) -> Result<Vec<PathBuf>, ReporterError> {
        let mut by_strategy: BTreeMap<_, Vec<_>> = BTreeMap::new();
        for result in &report.results {
            by_strategy
                .entry(result.strategy.name())
                .or_default()
                .push(result.clone());
        }

        let mut paths = Vec::with_capacity(by_strategy.len());
        for (strategy, results) in by_strategy {
            let strategy_report = BenchmarkReport {
                results,
                ..report.clone()
            };
            let filename = format!("{}_{}.json", strategy, report.timestamp.format(TIMESTAMP_FORMAT));
            paths.push(self.write(&filename, &strategy_report)?);
        }

        Ok(paths)
    }

    fn write(&self, filename: &str, report: &BenchmarkReport) -> Result<PathBuf, ReporterError> {
        let filepath = self.output_dir.join(filename);
        let mut writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.flush()?;
        Ok(filepath)
    }

    /// List all existing benchmark files in the output directory.
    pub fn list_reports(&self) -> Result<Vec<PathBuf>, ReporterError> {
        let mut reports = Vec::new();
        for entry in fs::read_dir(&self.output_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "json") {
                reports.push(path);
            }
        }
        reports.sort();
        Ok(reports)
    }

    /// Load an existing benchmark report from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<BenchmarkReport, ReporterError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}
