//! Error types surfaced to the user as alerts.

use thiserror::Error;

/// Bad user input, caught before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a YouTube link")]
    EmptyLink,
    #[error("Select between {min} and {max} questions")]
    QuestionCount { min: u32, max: u32 },
}

/// Failures talking to the quiz backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    /// The server answered with an explicit `error` field.
    #[error("{0}")]
    Server(String),
    #[error("backend request failed with status {0}")]
    Status(reqwest::StatusCode),
    #[error("backend returned no questions")]
    EmptyQuiz,
    #[error("unexpected backend response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Failures fetching and storing a notes document or audio summary.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("could not save download: {0}")]
    Save(#[from] std::io::Error),
}
