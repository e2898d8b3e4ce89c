use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fairway",
    version,
    about = "Judge code-golf submissions and keep the leaderboard"
)]
pub struct Cli {
    /// YAML config file; defaults plus FAIRWAY_* variables when omitted
    #[arg(long, global = true, env = "FAIRWAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Judge a solution and, if it passes, record it
    Submit(SubmitArgs),
    /// Create the leaderboard database
    InitDb,
    /// List a golfer's trophies and points
    Trophies(TrophiesArgs),
    /// Print the hole and language catalogue
    Catalog,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    #[arg(long)]
    pub hole: String,

    #[arg(long)]
    pub lang: String,

    /// Read code from this file instead of stdin
    #[arg(long)]
    pub code_file: Option<PathBuf>,

    /// Submit as this golfer; anonymous submissions are judged but not ranked
    #[arg(long, requires = "golfer_name")]
    pub golfer_id: Option<i64>,

    #[arg(long, requires = "golfer_id")]
    pub golfer_name: Option<String>,
}

#[derive(Args, Debug)]
pub struct TrophiesArgs {
    #[arg(long)]
    pub golfer_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_parses_with_global_flags_anywhere() {
        let cli = Cli::try_parse_from([
            "fairway",
            "submit",
            "--hole",
            "fizz-buzz",
            "--lang",
            "c",
            "--golfer-id",
            "7",
            "--golfer-name",
            "alice",
            "--log-json",
        ])
        .unwrap();

        assert!(cli.log_json);
        match cli.cmd {
            Command::Submit(args) => {
                assert_eq!(args.hole, "fizz-buzz");
                assert_eq!(args.golfer_id, Some(7));
                assert_eq!(args.golfer_name.as_deref(), Some("alice"));
                assert!(args.code_file.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn golfer_id_needs_a_name() {
        let err = Cli::try_parse_from([
            "fairway", "submit", "--hole", "quine", "--lang", "c", "--golfer-id", "7",
        ]);
        assert!(err.is_err());
    }
}
