use crate::errors::PipelineError;
use crate::trophy::Trophy;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeSet;
use std::time::Duration;

/// Body of a solution submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubmissionRequest {
    #[serde(alias = "code")]
    pub code: String,
    #[serde(alias = "hole")]
    pub hole: String,
    #[serde(alias = "lang")]
    pub lang: String,
}

impl SubmissionRequest {
    pub fn from_json(body: &[u8]) -> Result<Self, PipelineError> {
        serde_json::from_slice(body).map_err(PipelineError::MalformedRequest)
    }
}

/// Authenticated golfer, as resolved by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Golfer {
    pub id: i64,
    pub name: String,
}

impl Golfer {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// What the judge observed while running a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JudgeResult {
    pub pass: bool,
    pub timed_out: bool,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub answer: String,
    pub args: Vec<String>,
    pub took: Duration,
}

impl JudgeResult {
    /// A failed result carrying a backend diagnostic in stderr.
    pub fn fault(diagnostic: impl Into<String>) -> Self {
        Self {
            stderr: diagnostic.into().into_bytes(),
            ..Default::default()
        }
    }
}

/// Axis a solution is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scoring {
    Bytes,
    Chars,
}

impl Scoring {
    pub const ALL: [Scoring; 2] = [Scoring::Bytes, Scoring::Chars];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bytes => "bytes",
            Self::Chars => "chars",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bytes" => Some(Self::Bytes),
            "chars" => Some(Self::Chars),
            _ => None,
        }
    }

    /// Strokes of `code` on this axis.
    pub fn strokes(&self, code: &str) -> i64 {
        match self {
            Self::Bytes => code.len() as i64,
            Self::Chars => code.chars().count() as i64,
        }
    }
}

impl std::fmt::Display for Scoring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A golfer's position on one (hole, lang, scoring) board.
///
/// `strokes` and `rank` are `None` when the golfer has no passing solution there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RankSnapshot {
    pub joint: bool,
    pub rank: Option<i64>,
    pub strokes: Option<i64>,
}

/// Board position immediately before and after a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RankUpdate {
    pub scoring: Scoring,
    pub from: RankSnapshot,
    pub to: RankSnapshot,
    pub beat: i64,
}

impl RankUpdate {
    pub fn placeholder(scoring: Scoring) -> Self {
        Self {
            scoring,
            from: RankSnapshot::default(),
            to: RankSnapshot::default(),
            beat: 0,
        }
    }

    pub fn changed(&self) -> bool {
        self.from.strokes != self.to.strokes
    }

    /// Sole first place after the write.
    pub fn is_record(&self) -> bool {
        !self.to.joint && self.to.rank == Some(1)
    }
}

/// Response body for a judged submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SolutionResponse {
    pub argv: Vec<String>,
    pub diff: String,
    pub err: String,
    pub exp: String,
    pub out: String,
    pub pass: bool,
    pub logged_in: bool,
    pub rank_updates: [RankUpdate; 2],
    #[serde(serialize_with = "serialize_nanos")]
    pub took: Duration,
    pub trophies: BTreeSet<Trophy>,
}

impl SolutionResponse {
    /// Serialize without escaping markup; diff and stderr render verbatim.
    pub fn to_json(&self) -> Result<String, PipelineError> {
        serde_json::to_string(self).map_err(PipelineError::Serialize)
    }
}

fn serialize_nanos<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
}
