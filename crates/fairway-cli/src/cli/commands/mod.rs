use super::args::*;
use anyhow::Context;
use fairway_core::FairwayConfig;
use std::path::Path;

pub mod catalog;
pub mod init_db;
pub mod submit;
pub mod trophies;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let cfg = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Submit(args) => submit::run(args, cfg).await,
        Command::InitDb => init_db::run(&cfg),
        Command::Trophies(args) => trophies::run(args, &cfg),
        Command::Catalog => Ok(catalog::run(&cfg)),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<FairwayConfig> {
    let cfg = match path {
        Some(p) => FairwayConfig::load(p)
            .with_context(|| format!("failed to load config {}", p.display()))?,
        None => FairwayConfig::from_env().context("invalid FAIRWAY_* environment")?,
    };
    tracing::debug!(db = %cfg.database.path.display(), "config loaded");
    Ok(cfg)
}
