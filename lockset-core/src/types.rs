// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Newtype wrappers for validated inputs.
//!
//! Every type checks its invariants at creation time, so a `BenchConfig` assembled from
//! these types is valid by construction.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Set element type.
pub type Key = i64;

/// Allowed distance between the percentage sum and 100.
pub const MIX_TOLERANCE: f64 = 1e-6;

/// Synchronization discipline guarding the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Strategy {
    /// One mutex around the whole list.
    Coarse,
    /// One mutex per node, hand-over-hand traversal.
    Fine,
    /// One reader-writer lock around the whole list.
    ReadWrite,
}

impl Strategy {
    /// All strategies, in reporting order.
    pub const ALL: [Strategy; 3] = [Strategy::Coarse, Strategy::Fine, Strategy::ReadWrite];

    /// Name used on the command line and in reports.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Coarse => "coarse",
            Self::Fine => "fine",
            Self::ReadWrite => "rw",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coarse" => Ok(Self::Coarse),
            "fine" => Ok(Self::Fine),
            "rw" => Ok(Self::ReadWrite),
            other => Err(ConfigError::UnknownStrategy {
                name: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Strategy {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Strategy> for String {
    fn from(strategy: Strategy) -> Self {
        strategy.name().to_string()
    }
}

/// Number of worker threads. Must be at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct ThreadCount(NonZeroUsize);

impl ThreadCount {
    /// Create a new ThreadCount with validation.
    pub fn new(threads: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(threads)
            .map(Self)
            .ok_or_else(|| ConfigError::InvalidArgument {
                field: "threads",
                value: threads.to_string(),
                reason: "At least one worker thread is required".to_string(),
            })
    }

    /// Get the inner value.
    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for ThreadCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for ThreadCount {
    type Error = ConfigError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ThreadCount> for usize {
    fn from(threads: ThreadCount) -> Self {
        threads.get()
    }
}

/// Inclusive upper bound of the key space. Keys are drawn from `[0, key_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct KeyMax(Key);

impl KeyMax {
    /// Create a new KeyMax with validation.
    pub fn new(key_max: Key) -> Result<Self, ConfigError> {
        if key_max < 0 {
            return Err(ConfigError::InvalidArgument {
                field: "key_max",
                value: key_max.to_string(),
                reason: "Key space upper bound must not be negative".to_string(),
            });
        }
        Ok(Self(key_max))
    }

    /// Get the inner value.
    pub fn get(&self) -> Key {
        self.0
    }
}

impl fmt::Display for KeyMax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for KeyMax {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<KeyMax> for i64 {
    fn from(key_max: KeyMax) -> Self {
        key_max.0
    }
}

/// Kind of set operation issued by a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    Member,
    Insert,
    Delete,
}

impl OpKind {
    pub const ALL: [OpKind; 3] = [OpKind::Member, OpKind::Insert, OpKind::Delete];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Member => "Member",
            Self::Insert => "Insert",
            Self::Delete => "Delete",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unvalidated percentages, as written in a plan file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixPercentages {
    pub member: f64,
    pub insert: f64,
    pub delete: f64,
}

/// Validated Member/Insert/Delete mix. Percentages are non-negative and sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MixPercentages", into = "MixPercentages")]
pub struct OperationMix {
    member: f64,
    insert: f64,
    delete: f64,
}

impl OperationMix {
    /// Create a new mix from percentages in `[0, 100]`.
    pub fn new(member: f64, insert: f64, delete: f64) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("member_pct", member),
            ("insert_pct", insert),
            ("delete_pct", delete),
        ] {
            if value.is_nan() {
                return Err(ConfigError::InvalidArgument {
                    field,
                    value: value.to_string(),
                    reason: "Percentage must be a number".to_string(),
                });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativePercentage { field, value });
            }
        }

        let sum = member + insert + delete;
        if (sum - 100.0).abs() > MIX_TOLERANCE {
            return Err(ConfigError::PercentageSum { sum });
        }

        Ok(Self {
            member,
            insert,
            delete,
        })
    }

    pub fn member_pct(&self) -> f64 {
        self.member
    }

    pub fn insert_pct(&self) -> f64 {
        self.insert
    }

    pub fn delete_pct(&self) -> f64 {
        self.delete
    }

    /// Bucket a selector drawn from `[0, 1)` against the cumulative fractions.
    pub fn classify(&self, selector: f64) -> OpKind {
        let member = self.member / 100.0;
        let insert = self.insert / 100.0;
        if selector < member {
            OpKind::Member
        } else if selector < member + insert {
            OpKind::Insert
        } else {
            OpKind::Delete
        }
    }
}

impl fmt::Display for OperationMix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Member {}%, Insert {}%, Delete {}%",
            self.member, self.insert, self.delete
        )
    }
}

impl TryFrom<MixPercentages> for OperationMix {
    type Error = ConfigError;

    fn try_from(raw: MixPercentages) -> Result<Self, Self::Error> {
        Self::new(raw.member, raw.insert, raw.delete)
    }
}

impl From<OperationMix> for MixPercentages {
    fn from(mix: OperationMix) -> Self {
        Self {
            member: mix.member,
            insert: mix.insert,
            delete: mix.delete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parse() {
        assert_eq!("coarse".parse::<Strategy>().unwrap(), Strategy::Coarse);
        assert_eq!("fine".parse::<Strategy>().unwrap(), Strategy::Fine);
        assert_eq!("rw".parse::<Strategy>().unwrap(), Strategy::ReadWrite);
        assert!(matches!(
            "bogus".parse::<Strategy>(),
            Err(ConfigError::UnknownStrategy { .. })
        ));
        // Names are case-sensitive, as on the command line.
        assert!("Coarse".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_strategy_display_roundtrip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_thread_count() {
        assert!(ThreadCount::new(0).is_err());
        assert_eq!(ThreadCount::new(8).unwrap().get(), 8);
    }

    #[test]
    fn test_key_max() {
        assert!(KeyMax::new(-1).is_err());
        assert_eq!(KeyMax::new(0).unwrap().get(), 0);
    }

    #[test]
    fn test_mix_accepts_exact_sum() {
        assert!(OperationMix::new(80.0, 10.0, 10.0).is_ok());
        assert!(OperationMix::new(99.9, 0.05, 0.05).is_ok());
        assert!(OperationMix::new(100.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_mix_rejects_bad_sum() {
        let err = OperationMix::new(80.0, 10.0, 9.0).unwrap_err();
        assert!(matches!(err, ConfigError::PercentageSum { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_mix_rejects_negative() {
        let err = OperationMix::new(110.0, -10.0, 0.0).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NegativePercentage {
                field: "insert_pct",
                ..
            }
        ));
    }

    #[test]
    fn test_mix_rejects_nan() {
        assert!(OperationMix::new(f64::NAN, 50.0, 50.0).is_err());
    }

    #[test]
    fn test_mix_classify() {
        let mix = OperationMix::new(80.0, 10.0, 10.0).unwrap();
        assert_eq!(mix.classify(0.0), OpKind::Member);
        assert_eq!(mix.classify(0.79), OpKind::Member);
        assert_eq!(mix.classify(0.85), OpKind::Insert);
        assert_eq!(mix.classify(0.95), OpKind::Delete);

        let members_only = OperationMix::new(100.0, 0.0, 0.0).unwrap();
        assert_eq!(members_only.classify(0.999_999), OpKind::Member);

        let deletes_only = OperationMix::new(0.0, 0.0, 100.0).unwrap();
        assert_eq!(deletes_only.classify(0.0), OpKind::Delete);
    }

    #[test]
    fn test_mix_deserialize_validates() {
        let ok: OperationMix =
            serde_yaml::from_str("{ member: 80, insert: 10, delete: 10 }").unwrap();
        assert_eq!(ok.member_pct(), 80.0);

        let bad: Result<OperationMix, _> =
            serde_yaml::from_str("{ member: 80, insert: 10, delete: 9 }");
        assert!(bad.is_err());
    }
}
