use crate::cli::args::TrophiesArgs;
use crate::exit_codes;
use anyhow::Context;
use fairway_core::{FairwayConfig, Scoring, SqliteLeaderboard};

pub fn run(args: TrophiesArgs, cfg: &FairwayConfig) -> anyhow::Result<i32> {
    let store = SqliteLeaderboard::open(&cfg.database.path)
        .with_context(|| format!("failed to open {}", cfg.database.path.display()))?;

    let rows = store.trophies(args.golfer_id)?;
    if rows.is_empty() {
        println!("no trophies yet");
    }
    for row in rows {
        println!("{}\t{}", row.trophy, row.earned);
    }

    for scoring in Scoring::ALL {
        println!("{} points: {}", scoring, store.points(args.golfer_id, scoring)?);
    }
    Ok(exit_codes::SUCCESS)
}
