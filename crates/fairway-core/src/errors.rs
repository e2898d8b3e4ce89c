use thiserror::Error;

/// Leaderboard store errors.
///
/// Any of these aborts the submission that triggered it; nothing is retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Integrity violation: {0}")]
    Integrity(String),

    #[error("Store lock poisoned")]
    Poisoned,
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        match &e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StoreError::Integrity(e.to_string())
            }
            _ => StoreError::Database(e.to_string()),
        }
    }
}

/// Fatal errors for a single submission request.
///
/// Validation failures are not errors; see [`crate::pipeline::SubmissionOutcome`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Malformed request body: {0}")]
    MalformedRequest(#[source] serde_json::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to serialize response: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
