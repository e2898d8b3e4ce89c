//! Submission judging and leaderboard core for a code-golf site.
//!
//! A submission is validated against the catalogue, run by a [`Judge`],
//! and, when it passes for a logged-in golfer on a ranked hole, recorded in a
//! [`LeaderboardStore`]. Rank movement is logged, new sole first places are
//! announced off the request path, and trophies are granted idempotently.

pub mod announce;
pub mod catalog;
pub mod config;
pub mod diff;
pub mod errors;
pub mod judge;
pub mod model;
pub mod pipeline;
pub mod rank;
pub mod render;
pub mod storage;
pub mod trophy;

// Convenience re-exports
pub use announce::{AnnouncementQueue, AnnouncementSink, LogSink, RecordAnnouncement, WebhookSink};
pub use catalog::{Catalog, HoleKind, BYPASS_LANG};
pub use config::FairwayConfig;
pub use errors::{ConfigError, PipelineError, StoreError};
pub use judge::{CommandJudge, Judge};
pub use model::{
    Golfer, JudgeResult, RankSnapshot, RankUpdate, Scoring, SolutionResponse, SubmissionRequest,
};
pub use pipeline::{Reply, SubmissionOutcome, SubmissionPipeline, MAX_CODE_BYTES};
pub use storage::{LeaderboardStore, SqliteLeaderboard};
pub use trophy::{AchievementEngine, Trophy};
