use crate::errors::StoreError;
use crate::model::Scoring;
use crate::storage::AggregateQuery;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;

pub(crate) fn query_impl(
    conn: &Connection,
    golfer_id: i64,
    query: &AggregateQuery<'_>,
) -> Result<bool, StoreError> {
    match query {
        AggregateQuery::EveryLanguage { langs } => {
            let mut stmt = conn
                .prepare("SELECT DISTINCT lang FROM solutions WHERE NOT failing AND user_id = ?1")?;
            let rows = stmt.query_map([golfer_id], |row| row.get::<_, String>(0))?;
            let mut held = HashSet::new();
            for r in rows {
                held.insert(r?);
            }
            Ok(!langs.is_empty() && langs.iter().all(|l| held.contains(l)))
        }
        AggregateQuery::PointsAbove { threshold } => {
            let over: Option<bool> = conn
                .query_row(
                    "SELECT MAX(points) > ?2 FROM points WHERE user_id = ?1",
                    params![golfer_id, threshold],
                    |row| row.get::<_, Option<bool>>(0),
                )
                .optional()?
                .flatten();
            Ok(over.unwrap_or(false))
        }
        // Two languages times two scorings.
        AggregateQuery::LanguagePair { hole, langs } => {
            let rows: i64 = conn.query_row(
                r#"
                SELECT COUNT(*) FROM solutions
                 WHERE NOT failing AND hole = ?1 AND lang IN (?2, ?3) AND user_id = ?4
                "#,
                params![hole, langs[0], langs[1], golfer_id],
                |row| row.get(0),
            )?;
            Ok(rows == 4)
        }
    }
}

pub(crate) fn points_impl(
    conn: &Connection,
    golfer_id: i64,
    scoring: Scoring,
) -> Result<f64, StoreError> {
    let points: Option<f64> = conn
        .query_row(
            "SELECT points FROM points WHERE user_id = ?1 AND scoring = ?2",
            params![golfer_id, scoring.as_str()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(points.unwrap_or(0.0))
}
