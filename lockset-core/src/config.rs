// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark configuration with strict validation.
//!
//! A single run is described by a [`BenchConfig`]. A sweep of runs is described by a YAML
//! plan loaded through [`ConfigLoader`]. Both go through the same raw-then-validate path:
//! nothing is executed unless every field is valid.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, LocksetError, LocksetResult};
use crate::types::{KeyMax, MixPercentages, OperationMix, Strategy, ThreadCount};

/// Unvalidated single-run configuration, in command-line order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawBenchConfig {
    pub strategy: String,
    pub threads: usize,
    pub ops_per_thread: u64,
    pub member_pct: f64,
    pub insert_pct: f64,
    pub delete_pct: f64,
    pub initial_size: usize,
    pub key_max: i64,
    pub seed: u64,
}

/// Validated single-run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    pub strategy: Strategy,
    pub threads: ThreadCount,
    pub ops_per_thread: u64,
    pub mix: OperationMix,
    pub initial_size: usize,
    pub key_max: KeyMax,
    pub seed: u64,
}

impl BenchConfig {
    /// Validate a raw configuration.
    ///
    /// The mix is checked before the strategy name, so a run with both problems reports the
    /// mix error.
    pub fn validate(raw: RawBenchConfig) -> Result<Self, ConfigError> {
        let threads = ThreadCount::new(raw.threads)?;
        let key_max = KeyMax::new(raw.key_max)?;
        let mix = OperationMix::new(raw.member_pct, raw.insert_pct, raw.delete_pct)?;
        let strategy = raw.strategy.parse()?;

        Ok(Self {
            strategy,
            threads,
            ops_per_thread: raw.ops_per_thread,
            mix,
            initial_size: raw.initial_size,
            key_max,
            seed: raw.seed,
        })
    }

    /// Operations issued by all workers together.
    pub fn total_operations(&self) -> u64 {
        (self.threads.get() as u64).saturating_mul(self.ops_per_thread)
    }
}

impl fmt::Display for BenchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Threads: {}, Ops per thread: {} (Total: {})",
            self.threads,
            self.ops_per_thread,
            self.total_operations()
        )?;
        writeln!(f, "Mix: {}", self.mix)?;
        write!(
            f,
            "Init N: {}, KeyMax: {}, Seed: {}",
            self.initial_size, self.key_max, self.seed
        )
    }
}

// =========================================================================
// Sweep plans
// =========================================================================

fn default_strategies() -> Vec<String> {
    Strategy::ALL.iter().map(|s| s.name().to_string()).collect()
}

fn default_threads() -> Vec<usize> {
    vec![1, 2, 4, 8]
}

fn default_initial_size() -> usize {
    1000
}

fn default_key_max() -> i64 {
    100_000
}

fn default_seed() -> u64 {
    42
}

/// Raw scenario as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
struct RawScenario {
    name: String,
    #[serde(default = "default_strategies")]
    strategies: Vec<String>,
    #[serde(default = "default_threads")]
    threads: Vec<usize>,
    ops_per_thread: u64,
    mix: MixPercentages,
    #[serde(default = "default_initial_size")]
    initial_size: usize,
    #[serde(default = "default_key_max")]
    key_max: i64,
    #[serde(default = "default_seed")]
    seed: u64,
}

/// Raw root of a plan file.
#[derive(Debug, Deserialize)]
struct RawPlan {
    scenarios: Vec<RawScenario>,
}

/// Named workload expanded over strategies and thread counts.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub runs: Vec<BenchConfig>,
}

/// Validated sweep plan.
#[derive(Debug, Clone)]
pub struct BenchPlan {
    pub scenarios: Vec<Scenario>,
}

impl BenchPlan {
    /// Read-mostly and write-heavy workloads over every strategy.
    pub fn default_plan() -> Self {
        const PLAN: &str = r#"
scenarios:
  - name: read-mostly
    ops_per_thread: 100000
    mix: { member: 99.9, insert: 0.05, delete: 0.05 }
  - name: write-heavy
    ops_per_thread: 100000
    mix: { member: 80, insert: 10, delete: 10 }
"#;
        // Built-in plan is static and valid.
        ConfigLoader::load_string(PLAN).unwrap_or(Self {
            scenarios: Vec::new(),
        })
    }

    /// Every run of every scenario, in plan order.
    pub fn runs(&self) -> impl Iterator<Item = (&str, &BenchConfig)> {
        self.scenarios
            .iter()
            .flat_map(|s| s.runs.iter().map(move |run| (s.name.as_str(), run)))
    }
}

/// Plan loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a plan from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> LocksetResult<BenchPlan> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::PlanNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path).map_err(|e| LocksetError::Io {
            context: "reading plan file",
            source: e,
        })?;

        Self::load_string(&content)
    }

    /// Load and validate a plan from a YAML string.
    pub fn load_string(content: &str) -> LocksetResult<BenchPlan> {
        let raw: RawPlan = serde_yaml::from_str(content).map_err(|e| ConfigError::PlanParse {
            message: format!("YAML parse error: {}", e),
        })?;

        Ok(Self::validate(raw)?)
    }

    fn validate(raw: RawPlan) -> Result<BenchPlan, ConfigError> {
        if raw.scenarios.is_empty() {
            return Err(ConfigError::PlanParse {
                message: "At least one scenario must be defined".to_string(),
            });
        }

        let mut seen_names = HashSet::new();
        let mut scenarios = Vec::with_capacity(raw.scenarios.len());
        for scenario in raw.scenarios {
            if !seen_names.insert(scenario.name.clone()) {
                return Err(ConfigError::PlanParse {
                    message: format!("Duplicate scenario name: {}", scenario.name),
                });
            }
            scenarios.push(Self::validate_scenario(scenario)?);
        }

        Ok(BenchPlan { scenarios })
    }

    fn validate_scenario(raw: RawScenario) -> Result<Scenario, ConfigError> {
        if raw.strategies.is_empty() {
            return Err(ConfigError::PlanParse {
                message: format!("Scenario '{}' lists no strategies", raw.name),
            });
        }
        if raw.threads.is_empty() {
            return Err(ConfigError::PlanParse {
                message: format!("Scenario '{}' lists no thread counts", raw.name),
            });
        }

        let mut runs = Vec::with_capacity(raw.strategies.len() * raw.threads.len());
        for strategy in &raw.strategies {
            for &threads in &raw.threads {
                runs.push(BenchConfig::validate(RawBenchConfig {
                    strategy: strategy.clone(),
                    threads,
                    ops_per_thread: raw.ops_per_thread,
                    member_pct: raw.mix.member,
                    insert_pct: raw.mix.insert,
                    delete_pct: raw.mix.delete,
                    initial_size: raw.initial_size,
                    key_max: raw.key_max,
                    seed: raw.seed,
                })?);
            }
        }

        Ok(Scenario {
            name: raw.name,
            runs,
        })
    }
}
