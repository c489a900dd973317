//! Webhook events the merge engine reacts to

use crate::error::{Error, Result};
use crate::types::{PullRequest, RepoRef};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// GitHub event type for pull request activity
pub const PULL_REQUEST_EVENT: &str = "pull_request";
/// GitHub event type for commit status updates
pub const STATUS_EVENT: &str = "status";
/// GitHub event type for submitted reviews
pub const PULL_REQUEST_REVIEW_EVENT: &str = "pull_request_review";

/// Webhook event types to subscribe to
pub const HANDLED_EVENT_TYPES: [&str; 3] =
    [PULL_REQUEST_EVENT, STATUS_EVENT, PULL_REQUEST_REVIEW_EVENT];

/// Whether events of `event_type` are consumed by the engine
pub fn handles(event_type: &str) -> bool {
    HANDLED_EVENT_TYPES.contains(&event_type)
}

/// Pull request activity (label changes among others)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    /// Repository the PR lives in
    pub repo: RepoRef,
    /// Webhook action, e.g. "labeled", "opened"
    pub action: String,
    /// The pull request as delivered with the event
    pub pull_request: PullRequest,
}

/// A review was submitted on a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEvent {
    /// Repository the PR lives in
    pub repo: RepoRef,
    /// Review state, e.g. `approved` or `changes_requested`
    pub review_state: String,
    /// The reviewed pull request
    pub pull_request: PullRequest,
}

/// A commit status changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEvent {
    /// Repository the commit lives in
    pub repo: RepoRef,
    /// Commit SHA
    pub sha: String,
    /// New status state, e.g. "success", "pending"
    pub state: String,
}

/// An event the merge engine can act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `pull_request` webhook
    PullRequestLabeled(PullRequestEvent),
    /// `status` webhook
    CommitStatusUpdated(StatusEvent),
    /// `pull_request_review` webhook
    ReviewSubmitted(ReviewEvent),
}

impl Event {
    /// Repository the event belongs to
    pub const fn repo(&self) -> &RepoRef {
        match self {
            Self::PullRequestLabeled(e) => &e.repo,
            Self::CommitStatusUpdated(e) => &e.repo,
            Self::ReviewSubmitted(e) => &e.repo,
        }
    }

    /// Decode a GitHub webhook payload.
    ///
    /// Returns `Ok(None)` for event types the engine does not consume.
    pub fn from_webhook(event_type: &str, payload: &serde_json::Value) -> Result<Option<Self>> {
        let event = match event_type {
            PULL_REQUEST_EVENT => {
                let p: PullRequestPayload = decode(event_type, payload)?;
                Self::PullRequestLabeled(PullRequestEvent {
                    repo: p.repository.into(),
                    action: p.action,
                    pull_request: p.pull_request.into(),
                })
            }
            PULL_REQUEST_REVIEW_EVENT => {
                let p: ReviewPayload = decode(event_type, payload)?;
                Self::ReviewSubmitted(ReviewEvent {
                    repo: p.repository.into(),
                    review_state: p.review.state,
                    pull_request: p.pull_request.into(),
                })
            }
            STATUS_EVENT => {
                let p: StatusPayload = decode(event_type, payload)?;
                Self::CommitStatusUpdated(StatusEvent {
                    repo: p.repository.into(),
                    sha: p.sha,
                    state: p.state,
                })
            }
            _ => return Ok(None),
        };
        Ok(Some(event))
    }
}

fn decode<T: DeserializeOwned>(event_type: &str, payload: &serde_json::Value) -> Result<T> {
    T::deserialize(payload).map_err(|e| Error::Payload(format!("{event_type}: {e}")))
}

// Webhook payload shapes (only the fields we read)

#[derive(Deserialize)]
struct RepositoryPayload {
    name: String,
    owner: OwnerPayload,
}

#[derive(Deserialize)]
struct OwnerPayload {
    login: String,
}

impl From<RepositoryPayload> for RepoRef {
    fn from(repo: RepositoryPayload) -> Self {
        Self {
            owner: repo.owner.login,
            name: repo.name,
        }
    }
}

#[derive(Deserialize)]
struct PullRequestRefPayload {
    #[serde(rename = "ref")]
    ref_field: String,
    sha: String,
}

#[derive(Deserialize)]
struct PullRequestBody {
    number: u64,
    html_url: String,
    head: PullRequestRefPayload,
    base: PullRequestRefPayload,
}

impl From<PullRequestBody> for PullRequest {
    fn from(pr: PullRequestBody) -> Self {
        Self {
            number: pr.number,
            html_url: pr.html_url,
            head_sha: pr.head.sha,
            base_ref: pr.base.ref_field,
        }
    }
}

#[derive(Deserialize)]
struct PullRequestPayload {
    action: String,
    pull_request: PullRequestBody,
    repository: RepositoryPayload,
}

#[derive(Deserialize)]
struct ReviewBody {
    state: String,
}

#[derive(Deserialize)]
struct ReviewPayload {
    review: ReviewBody,
    pull_request: PullRequestBody,
    repository: RepositoryPayload,
}

#[derive(Deserialize)]
struct StatusPayload {
    sha: String,
    state: String,
    repository: RepositoryPayload,
}
