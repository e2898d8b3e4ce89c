//! SqliteLeaderboard: SQLite-backed leaderboard store.
//!
//! Provides:
//! - Atomic pass recording (`BEGIN IMMEDIATE`), so rank snapshots before and
//!   after a write never straddle another writer
//! - Idempotent trophy grants (`ON CONFLICT DO NOTHING`)
//! - Read-only aggregate predicates for trophy rules

use super::store_internal::{aggregate, record, schema, trophies};
use super::{AggregateQuery, Grant, LeaderboardStore, PassRecord};
use crate::errors::StoreError;
use crate::model::{RankSnapshot, Scoring};
use crate::trophy::Trophy;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// A stored trophy grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrophyRow {
    pub trophy: Trophy,
    pub earned: String,
}

#[derive(Clone)]
pub struct SqliteLeaderboard {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl SqliteLeaderboard {
    /// Open a file-backed store.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        schema::open_impl(path)
    }

    /// Create an in-memory store (for testing).
    pub fn memory() -> Result<Self, StoreError> {
        schema::memory_impl()
    }

    /// Create store from existing connection (for multi-connection tests).
    pub fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        schema::from_connection_impl(conn)
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Current position of a golfer on one board.
    pub fn rank_snapshot(
        &self,
        golfer_id: i64,
        hole: &str,
        lang: &str,
        scoring: Scoring,
    ) -> Result<RankSnapshot, StoreError> {
        let conn = self.lock()?;
        record::snapshot_impl(&conn, golfer_id, hole, lang, scoring)
    }

    /// Flag a golfer's solutions for (hole, lang) as failing, e.g. after a
    /// re-judge. Failing rows drop out of ranks and aggregates.
    pub fn mark_failing(
        &self,
        hole: &str,
        lang: &str,
        golfer_id: i64,
    ) -> Result<usize, StoreError> {
        let conn = self.lock()?;
        record::mark_failing_impl(&conn, hole, lang, golfer_id)
    }

    /// All trophies a golfer holds, oldest first.
    pub fn trophies(&self, golfer_id: i64) -> Result<Vec<TrophyRow>, StoreError> {
        let conn = self.lock()?;
        trophies::list_impl(&conn, golfer_id)
    }

    /// Points total for a golfer on one scoring.
    pub fn points(&self, golfer_id: i64, scoring: Scoring) -> Result<f64, StoreError> {
        let conn = self.lock()?;
        aggregate::points_impl(&conn, golfer_id, scoring)
    }
}

impl LeaderboardStore for SqliteLeaderboard {
    fn record_pass(
        &self,
        code: &str,
        hole: &str,
        lang: &str,
        golfer_id: i64,
    ) -> Result<PassRecord, StoreError> {
        let conn = self.lock()?;

        // BEGIN IMMEDIATE acquires write lock immediately
        conn.execute("BEGIN IMMEDIATE", [])?;

        let result = record::record_pass_inner_impl(&conn, code, hole, lang, golfer_id);

        match &result {
            Ok(_) => {
                conn.execute("COMMIT", [])?;
            }
            Err(_) => {
                let _ = conn.execute("ROLLBACK", []);
            }
        }

        result
    }

    fn grant_trophy(&self, golfer_id: i64, trophy: Trophy) -> Result<Grant, StoreError> {
        let conn = self.lock()?;
        trophies::grant_impl(&conn, golfer_id, trophy)
    }

    fn query_aggregate(
        &self,
        golfer_id: i64,
        query: &AggregateQuery<'_>,
    ) -> Result<bool, StoreError> {
        let conn = self.lock()?;
        aggregate::query_impl(&conn, golfer_id, query)
    }
}
