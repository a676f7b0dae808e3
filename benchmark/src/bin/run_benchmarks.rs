// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI tool to run a benchmark sweep and generate reports.

use clap::Parser;
use lockset_benchmark::{
    BenchmarkHarness, BenchmarkReport, BenchmarkResult, JsonReporter, ThroughputMetrics,
};
use lockset_core::{BenchPlan, ConfigLoader, Strategy};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "run_benchmarks")]
#[command(about = "Run lockset benchmark sweeps and generate JSON reports")]
struct Args {
    /// Output directory for benchmark data
    #[arg(short, long, default_value = "data")]
    output: PathBuf,

    /// Number of measured runs per configuration
    #[arg(short, long, default_value_t = 5)]
    iterations: u64,

    /// YAML sweep plan (built-in read-mostly/write-heavy plan if not specified)
    #[arg(short, long)]
    plan: Option<PathBuf>,

    /// Strategies to run (all if not specified)
    #[arg(short, long)]
    strategy: Option<Vec<Strategy>>,

    /// Run in quick mode (one measured run, no warmup)
    #[arg(long)]
    quick: bool,

    /// Also write one report file per strategy
    #[arg(long)]
    split: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let (warmup, iterations) = if args.quick { (0, 1) } else { (1, args.iterations) };

    let plan = match &args.plan {
        Some(path) => ConfigLoader::load_file(path)?,
        None => BenchPlan::default_plan(),
    };

    let reporter = JsonReporter::new(&args.output)?;
    let mut report = BenchmarkReport::new();
    let harness = BenchmarkHarness::new().warmup(warmup).iterations(iterations);

    println!("lockset Benchmark Suite");
    println!("=======================");
    println!("System: {}", report.system_info);
    println!("Output directory: {:?}", reporter.output_dir());
    println!("Iterations: {}", harness.measurement_iterations());
    println!();

    let selected = args.strategy.unwrap_or_else(|| Strategy::ALL.to_vec());

    for (scenario, config) in plan.runs() {
        if !selected.contains(&config.strategy) {
            continue;
        }
        tracing::info!(scenario, strategy = %config.strategy, threads = %config.threads, "Running");

        let runs = harness.run_config(config)?;
        let (Some(first), Some(last)) = (runs.first(), runs.last()) else {
            continue;
        };
        if let Some(result) = BenchmarkResult::from_runs(scenario, &runs, false) {
            let result = result
                .with_metadata("initial_inserted", first.initial.inserted)
                .with_metadata("final_size", last.final_size);
            println!("  ✓ {}", result.name);
            report.add_result(result);
        }
    }

    let path = reporter.save(&report)?;
    println!();
    println!("Benchmark report saved to: {:?}", path);
    if args.split {
        for path in reporter.save_by_strategy(&report)? {
            println!("Strategy report saved to: {:?}", path);
        }
    }
    println!();

    print_summary(&report);

    Ok(())
}

fn print_summary(report: &BenchmarkReport) {
    use lockset_benchmark::LatencyMetrics;

    println!("Summary");
    println!("-------");
    println!();

    for result in &report.results {
        if let (Some(latency), Some(throughput)) = (&result.latency, &result.throughput) {
            println!(
                "{}: median={}, throughput={}",
                result.name,
                LatencyMetrics::format_latency(latency.median_ns),
                ThroughputMetrics::format_ops_per_sec(throughput.ops_per_sec)
            );
        }
    }
}
