use crate::exit_codes;
use anyhow::Context;
use fairway_core::{FairwayConfig, SqliteLeaderboard};

pub fn run(cfg: &FairwayConfig) -> anyhow::Result<i32> {
    let path = &cfg.database.path;
    SqliteLeaderboard::open(path).with_context(|| format!("failed to create {}", path.display()))?;
    tracing::info!(db = %path.display(), "leaderboard ready");
    println!("✅ {}", path.display());
    Ok(exit_codes::SUCCESS)
}
