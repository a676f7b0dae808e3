// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Shared operation tallies.
//!
//! Plain atomic increments; no other synchronization is involved. Totals are read once all
//! workers have been joined.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::types::OpKind;

#[derive(Debug, Default)]
struct OpCounter {
    attempted: AtomicU64,
    succeeded: AtomicU64,
}

impl OpCounter {
    fn record(&self, success: bool) {
        self.attempted.fetch_add(1, Ordering::Relaxed);
        if success {
            self.succeeded.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn tally(&self) -> OpTally {
        OpTally {
            attempted: self.attempted.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
        }
    }
}

/// Attempted/succeeded counters for each operation kind.
#[derive(Debug, Default)]
pub struct Counters {
    member: OpCounter,
    insert: OpCounter,
    delete: OpCounter,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, kind: OpKind) -> &OpCounter {
        match kind {
            OpKind::Member => &self.member,
            OpKind::Insert => &self.insert,
            OpKind::Delete => &self.delete,
        }
    }

    /// Count one attempt of `kind`, and one success if `success`.
    pub fn record(&self, kind: OpKind, success: bool) {
        self.counter(kind).record(success);
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            member: self.member.tally(),
            insert: self.insert.tally(),
            delete: self.delete.tally(),
        }
    }
}

/// Counts for one operation kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpTally {
    pub attempted: u64,
    pub succeeded: u64,
}

/// Point-in-time copy of [`Counters`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSnapshot {
    pub member: OpTally,
    pub insert: OpTally,
    pub delete: OpTally,
}

impl CounterSnapshot {
    pub fn get(&self, kind: OpKind) -> OpTally {
        match kind {
            OpKind::Member => self.member,
            OpKind::Insert => self.insert,
            OpKind::Delete => self.delete,
        }
    }

    pub fn total_attempted(&self) -> u64 {
        self.member.attempted + self.insert.attempted + self.delete.attempted
    }

    pub fn total_succeeded(&self) -> u64 {
        self.member.succeeded + self.insert.succeeded + self.delete.succeeded
    }

    /// Net change in set size caused by the run.
    pub fn net_growth(&self) -> i64 {
        self.insert.succeeded as i64 - self.delete.succeeded as i64
    }
}
