//! SQLite schema for the leaderboard.
//!
//! Tables:
//! - `solutions`: best solution per (golfer, hole, lang, scoring)
//! - `trophies`: append-only grants, unique per (golfer, trophy)
//!
//! Views:
//! - `points`: per-golfer points totals per scoring

/// DDL for leaderboard tables and views.
///
/// Schema version: 1
pub const LEADERBOARD_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS solutions (
    user_id     INTEGER NOT NULL,
    hole        TEXT NOT NULL,
    lang        TEXT NOT NULL,
    scoring     TEXT NOT NULL CHECK (scoring IN ('bytes', 'chars')),
    code        TEXT NOT NULL,
    strokes     INTEGER NOT NULL,
    failing     INTEGER NOT NULL DEFAULT 0,
    submitted   TEXT NOT NULL,
    PRIMARY KEY (user_id, hole, lang, scoring)
);

CREATE INDEX IF NOT EXISTS idx_solutions_board
    ON solutions(hole, lang, scoring, strokes);

-- Grants are permanent; no UPDATE or DELETE path exists.
CREATE TABLE IF NOT EXISTS trophies (
    earned      TEXT NOT NULL,
    user_id     INTEGER NOT NULL,
    trophy      TEXT NOT NULL,
    PRIMARY KEY (user_id, trophy)
);

-- Points per hole: round(1000 * hole best / golfer best), best over any lang.
CREATE VIEW IF NOT EXISTS points AS
WITH golfer_best AS (
    SELECT user_id, hole, scoring, MIN(strokes) AS strokes
      FROM solutions
     WHERE NOT failing
  GROUP BY user_id, hole, scoring
), hole_best AS (
    SELECT hole, scoring, MIN(strokes) AS strokes
      FROM golfer_best
  GROUP BY hole, scoring
)
SELECT g.user_id AS user_id,
       g.scoring AS scoring,
       SUM(ROUND(1000.0 * h.strokes / g.strokes)) AS points
  FROM golfer_best g
  JOIN hole_best h ON h.hole = g.hole AND h.scoring = g.scoring
 WHERE g.strokes > 0
GROUP BY g.user_id, g.scoring;
"#;
