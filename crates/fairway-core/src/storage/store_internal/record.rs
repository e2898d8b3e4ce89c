//! Pass recording and rank snapshots.
//!
//! Every function here runs on a connection the caller already holds; the
//! facade wraps `record_pass_inner_impl` in `BEGIN IMMEDIATE`.

use super::trophies::grant_impl;
use crate::errors::StoreError;
use crate::model::{RankSnapshot, RankUpdate, Scoring};
use crate::storage::{Grant, PassRecord};
use crate::trophy::Trophy;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeSet;

/// Rank is one more than the number of golfers strictly ahead; equal strokes
/// share a rank and are flagged joint.
pub(crate) fn snapshot_impl(
    conn: &Connection,
    golfer_id: i64,
    hole: &str,
    lang: &str,
    scoring: Scoring,
) -> Result<RankSnapshot, StoreError> {
    let row: Option<(i64, i64, bool)> = conn
        .query_row(
            r#"
            SELECT s.strokes,
                   1 + (SELECT COUNT(*) FROM solutions o
                         WHERE o.hole = s.hole AND o.lang = s.lang
                           AND o.scoring = s.scoring AND NOT o.failing
                           AND o.strokes < s.strokes),
                   EXISTS (SELECT 1 FROM solutions o
                            WHERE o.hole = s.hole AND o.lang = s.lang
                              AND o.scoring = s.scoring AND NOT o.failing
                              AND o.strokes = s.strokes AND o.user_id != s.user_id)
              FROM solutions s
             WHERE s.user_id = ?1 AND s.hole = ?2 AND s.lang = ?3
               AND s.scoring = ?4 AND NOT s.failing
            "#,
            params![golfer_id, hole, lang, scoring.as_str()],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()?;

    Ok(match row {
        Some((strokes, rank, joint)) => RankSnapshot {
            joint,
            rank: Some(rank),
            strokes: Some(strokes),
        },
        None => RankSnapshot::default(),
    })
}

fn beat_impl(
    conn: &Connection,
    golfer_id: i64,
    hole: &str,
    lang: &str,
    scoring: Scoring,
    new_strokes: i64,
    old_strokes: Option<i64>,
) -> Result<i64, StoreError> {
    let beat = conn.query_row(
        r#"
        SELECT COUNT(*) FROM solutions
         WHERE hole = ?1 AND lang = ?2 AND scoring = ?3 AND NOT failing
           AND user_id != ?4
           AND strokes > ?5
           AND (?6 IS NULL OR strokes <= ?6)
        "#,
        params![hole, lang, scoring.as_str(), golfer_id, new_strokes, old_strokes],
        |row| row.get(0),
    )?;
    Ok(beat)
}

/// Store `code` on one scoring if it improves or ties the golfer's best.
fn record_scoring_impl(
    conn: &Connection,
    code: &str,
    hole: &str,
    lang: &str,
    golfer_id: i64,
    scoring: Scoring,
    submitted: &str,
) -> Result<RankUpdate, StoreError> {
    let from = snapshot_impl(conn, golfer_id, hole, lang, scoring)?;
    let strokes = scoring.strokes(code);

    let keeps = match from.strokes {
        Some(best) => strokes <= best,
        None => true,
    };
    if !keeps {
        return Ok(RankUpdate {
            scoring,
            from,
            to: from,
            beat: 0,
        });
    }

    let beat = beat_impl(conn, golfer_id, hole, lang, scoring, strokes, from.strokes)?;

    conn.execute(
        r#"
        INSERT INTO solutions (user_id, hole, lang, scoring, code, strokes, failing, submitted)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7)
        ON CONFLICT(user_id, hole, lang, scoring) DO UPDATE SET
            code = excluded.code,
            strokes = excluded.strokes,
            failing = 0,
            submitted = excluded.submitted
        "#,
        params![golfer_id, hole, lang, scoring.as_str(), code, strokes, submitted],
    )?;

    let to = snapshot_impl(conn, golfer_id, hole, lang, scoring)?;
    Ok(RankUpdate {
        scoring,
        from,
        to,
        beat,
    })
}

/// Trophies earned by the write itself.
fn earned_trophies(
    first_solution: bool,
    hole: &str,
    lang: &str,
    updates: &[RankUpdate; 2],
) -> Vec<Trophy> {
    let mut out = Vec::new();
    if first_solution {
        out.push(Trophy::HelloWorld);
    }
    match hole {
        "fizz-buzz" => out.push(Trophy::InterviewReady),
        "quine" => out.push(Trophy::Ouroboros),
        "brainfuck" if lang == "brainfuck" => out.push(Trophy::Inception),
        _ => {}
    }
    if lang == "php" {
        out.push(Trophy::ElephpantInTheRoom);
    }
    // Only a write that moves the golfer's strokes can earn bullseye.
    if updates.iter().any(|u| u.changed() && u.is_record()) {
        out.push(Trophy::Bullseye);
    }
    out
}

pub(crate) fn record_pass_inner_impl(
    conn: &Connection,
    code: &str,
    hole: &str,
    lang: &str,
    golfer_id: i64,
) -> Result<PassRecord, StoreError> {
    let first_solution: bool = conn.query_row(
        "SELECT NOT EXISTS (SELECT 1 FROM solutions WHERE user_id = ?1)",
        [golfer_id],
        |row| row.get(0),
    )?;

    let submitted = Utc::now().to_rfc3339();
    let bytes = record_scoring_impl(conn, code, hole, lang, golfer_id, Scoring::Bytes, &submitted)?;
    let chars = record_scoring_impl(conn, code, hole, lang, golfer_id, Scoring::Chars, &submitted)?;
    let updates = [bytes, chars];

    let mut trophies = BTreeSet::new();
    for trophy in earned_trophies(first_solution, hole, lang, &updates) {
        if grant_impl(conn, golfer_id, trophy)? == Grant::Granted {
            trophies.insert(trophy);
        }
    }

    Ok(PassRecord {
        trophies,
        bytes,
        chars,
    })
}

pub(crate) fn mark_failing_impl(
    conn: &Connection,
    hole: &str,
    lang: &str,
    golfer_id: i64,
) -> Result<usize, StoreError> {
    let n = conn.execute(
        "UPDATE solutions SET failing = 1 WHERE hole = ?1 AND lang = ?2 AND user_id = ?3",
        params![hole, lang, golfer_id],
    )?;
    Ok(n)
}
