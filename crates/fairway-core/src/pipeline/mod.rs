//! SubmissionPipeline: the single entry point for a solution submission.
//!
//! validate → judge → assemble response → (persist → interpret ranks →
//! announce records → evaluate trophies) → serialize.

mod pipeline_internal;

use crate::announce::AnnouncementQueue;
use crate::catalog::Catalog;
use crate::errors::PipelineError;
use crate::judge::Judge;
use crate::model::{Golfer, SolutionResponse, SubmissionRequest};
use crate::storage::LeaderboardStore;
use crate::trophy::AchievementEngine;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Code must be strictly shorter than this many bytes.
pub const MAX_CODE_BYTES: usize = 128 * 1024;

pub const DEFAULT_JUDGE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    UnknownHole,
    UnknownLang,
    TooLarge,
    Judged(Box<SolutionResponse>),
}

impl SubmissionOutcome {
    /// HTTP-equivalent status of the outcome.
    pub fn status(&self) -> u16 {
        match self {
            Self::UnknownHole | Self::UnknownLang => 404,
            Self::TooLarge => 413,
            Self::Judged(_) => 200,
        }
    }

    pub fn response(&self) -> Option<&SolutionResponse> {
        match self {
            Self::Judged(resp) => Some(resp),
            _ => None,
        }
    }
}

/// Status plus serialized body, ready for a transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: Option<String>,
}

#[derive(Clone)]
pub struct SubmissionPipeline {
    catalog: Arc<Catalog>,
    judge: Arc<dyn Judge>,
    store: Arc<dyn LeaderboardStore>,
    engine: AchievementEngine,
    announcer: Option<AnnouncementQueue>,
    judge_timeout: Duration,
}

impl SubmissionPipeline {
    pub fn new(
        catalog: Arc<Catalog>,
        judge: Arc<dyn Judge>,
        store: Arc<dyn LeaderboardStore>,
    ) -> Self {
        Self {
            catalog,
            judge,
            store,
            engine: AchievementEngine::new(),
            announcer: None,
            judge_timeout: DEFAULT_JUDGE_TIMEOUT,
        }
    }

    pub fn with_announcer(mut self, announcer: AnnouncementQueue) -> Self {
        self.announcer = Some(announcer);
        self
    }

    pub fn with_judge_timeout(mut self, timeout: Duration) -> Self {
        self.judge_timeout = timeout;
        self
    }

    pub fn with_engine(mut self, engine: AchievementEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Handle one submission. Dropping the returned future cancels judging.
    pub async fn submit(
        &self,
        req: &SubmissionRequest,
        golfer: Option<&Golfer>,
    ) -> Result<SubmissionOutcome, PipelineError> {
        self.submit_at(Utc::now(), req, golfer).await
    }

    /// As [`submit`](Self::submit), with calendar rules evaluated at `now`.
    pub async fn submit_at(
        &self,
        now: DateTime<Utc>,
        req: &SubmissionRequest,
        golfer: Option<&Golfer>,
    ) -> Result<SubmissionOutcome, PipelineError> {
        pipeline_internal::run::submit_impl(self, now, req, golfer).await
    }

    /// Parse a JSON request body, submit it and serialize the result.
    pub async fn handle_json(
        &self,
        body: &[u8],
        golfer: Option<&Golfer>,
    ) -> Result<Reply, PipelineError> {
        let req = SubmissionRequest::from_json(body)?;
        let outcome = self.submit(&req, golfer).await?;
        let body = match outcome.response() {
            Some(resp) => Some(resp.to_json()?),
            None => None,
        };
        Ok(Reply {
            status: outcome.status(),
            body,
        })
    }
}
