//! Interpretation of rank movement after a stored pass.

use crate::model::{Golfer, RankSnapshot, RankUpdate};

/// English ordinal suffix: 1st, 2nd, 3rd, 4th, 11th, 12th, 13th, 21st.
pub fn ordinal(n: i64) -> &'static str {
    match (n % 100, n % 10) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    }
}

fn strokes_text(s: &RankSnapshot) -> String {
    s.strokes.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn position_text(s: &RankSnapshot) -> String {
    match s.rank {
        Some(rank) => {
            let joint = if s.joint { "joint " } else { "" };
            format!("{}{}{}", joint, rank, ordinal(rank))
        }
        None => "unranked".to_string(),
    }
}

/// One-line summary, e.g. `alice: fizz-buzz/perl/bytes 60 (joint 2nd) → 58 (1st)`.
pub fn summarize(golfer: &Golfer, hole: &str, lang: &str, update: &RankUpdate) -> String {
    format!(
        "{}: {}/{}/{} {} ({}) → {} ({})",
        golfer.name,
        hole,
        lang,
        update.scoring,
        strokes_text(&update.from),
        position_text(&update.from),
        strokes_text(&update.to),
        position_text(&update.to),
    )
}

/// What a submission's rank updates amount to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankDelta {
    pub summaries: Vec<String>,
    pub records: Vec<RankUpdate>,
}

/// Unchanged updates are skipped entirely; changed ones are logged and, when
/// they leave the golfer sole first, collected as records.
pub fn interpret(golfer: &Golfer, hole: &str, lang: &str, updates: &[RankUpdate]) -> RankDelta {
    let mut delta = RankDelta::default();

    for update in updates.iter().filter(|u| u.changed()) {
        let line = summarize(golfer, hole, lang, update);
        tracing::info!(
            golfer = %golfer.name,
            hole,
            lang,
            scoring = %update.scoring,
            beat = update.beat,
            "{}",
            line
        );
        delta.summaries.push(line);

        if update.is_record() {
            delta.records.push(*update);
        }
    }

    delta
}
