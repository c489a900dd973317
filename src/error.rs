//! Error types for automerger

use std::fmt;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while evaluating or merging pull requests
#[derive(Debug, Error)]
pub enum Error {
    /// GitHub API call failed
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Generic forge failure (used by alternative `ForgeClient` implementations)
    #[error("platform error: {0}")]
    Platform(String),

    /// A forge call made on behalf of a specific pull request failed
    #[error("failed to {action} {url}: {source}")]
    PullRequest {
        /// What was being attempted, e.g. "get statuses of pull request"
        action: String,
        /// Web URL of the pull request
        url: String,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// Searching pull requests for a commit failed
    #[error("failed to search open pull requests for commit {sha}: {source}")]
    Search {
        /// Commit SHA searched for
        sha: String,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// Several pull requests failed while handling one event
    #[error(transparent)]
    Batch(ErrorBatch),

    /// Configuration could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),

    /// Webhook payload did not match the expected shape
    #[error("invalid webhook payload: {0}")]
    Payload(String),

    /// No usable credentials
    #[error("authentication error: {0}")]
    Auth(String),
}

impl Error {
    /// Wrap `source` with the action being performed and the pull request URL
    pub fn pull_request(action: impl Into<String>, url: &str, source: Self) -> Self {
        Self::PullRequest {
            action: action.into(),
            url: url.to_string(),
            source: Box::new(source),
        }
    }
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

/// Failures collected across independent pull requests, reported as one error.
///
/// Built up while a status event fans out to several pull requests so that one
/// failure never stops the others from being attempted.
#[derive(Debug, Default)]
pub struct ErrorBatch {
    errors: Vec<Error>,
}

impl ErrorBatch {
    /// Create an empty batch
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record a failure
    pub fn push(&mut self, err: Error) {
        self.errors.push(err);
    }

    /// Record the failure of `result`, if any
    pub fn absorb<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(err);
                None
            }
        }
    }

    /// Number of collected failures
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether nothing has failed
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Collected failures in the order they occurred
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// `Ok(())` when empty, otherwise the combined error.
    ///
    /// A single failure is returned as-is rather than wrapped.
    pub fn into_result(mut self) -> Result<()> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(self.errors.remove(0)),
            _ => Err(Error::Batch(self)),
        }
    }
}

impl FromIterator<Error> for ErrorBatch {
    fn from_iter<I: IntoIterator<Item = Error>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ErrorBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pull request(s) failed", self.errors.len())?;
        for err in &self.errors {
            write!(f, "; {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorBatch {}
