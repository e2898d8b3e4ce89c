//! Leaderboard persistence contract.
//!
//! The pipeline only relies on the guarantees documented on
//! [`LeaderboardStore::record_pass`]; [`SqliteLeaderboard`] is one store that
//! provides them.

mod schema;
mod sqlite;
mod store_internal;

pub use schema::LEADERBOARD_SCHEMA;
pub use sqlite::{SqliteLeaderboard, TrophyRow};

use crate::errors::StoreError;
use crate::model::RankUpdate;
use crate::trophy::Trophy;
use std::collections::BTreeSet;

/// Result of storing a passing solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassRecord {
    /// Trophies newly earned as part of the write.
    pub trophies: BTreeSet<Trophy>,
    pub bytes: RankUpdate,
    pub chars: RankUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    Granted,
    AlreadyHeld,
}

/// Read-only aggregate predicates used by trophy rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateQuery<'a> {
    /// Non-failing solutions in every one of `langs`.
    EveryLanguage { langs: &'a BTreeSet<String> },
    /// Bytes or chars points strictly above `threshold`.
    PointsAbove { threshold: i64 },
    /// Non-failing solutions for `hole` in both `langs` on both scorings.
    LanguagePair { hole: &'a str, langs: [&'static str; 2] },
}

pub trait LeaderboardStore: Send + Sync {
    /// Store a passing solution and report rank movement on both scorings.
    ///
    /// All-or-nothing: either the solution is stored and both updates describe
    /// the board immediately before and after this write with no other write
    /// in between, or nothing changes and an error is returned. A golfer's best
    /// strokes only move when the new solution improves or ties them.
    fn record_pass(
        &self,
        code: &str,
        hole: &str,
        lang: &str,
        golfer_id: i64,
    ) -> Result<PassRecord, StoreError>;

    /// Insert-if-absent; a duplicate grant is not an error.
    fn grant_trophy(&self, golfer_id: i64, trophy: Trophy) -> Result<Grant, StoreError>;

    fn query_aggregate(&self, golfer_id: i64, query: &AggregateQuery<'_>)
        -> Result<bool, StoreError>;
}
