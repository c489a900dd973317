//! Shared test fixtures

#![allow(dead_code)]

mod mock_forge;

pub use mock_forge::{MergeCall, MockForge};

use automerger::config::RepoConfig;
use automerger::event::{Event, PullRequestEvent, ReviewEvent, StatusEvent};
use automerger::types::{Issue, PullRequest, RepoRef};

/// Label used as "approved" throughout the tests
pub const APPROVED: &str = "approved";

/// Repository every fixture lives in
pub fn test_repo() -> RepoRef {
    RepoRef::new("test", "repo")
}

/// Config with the `approved` label enabled
pub fn enabled_config() -> RepoConfig {
    RepoConfig::with_approved_label(APPROVED)
}

/// Web URL for PR `number`
pub fn pr_url(number: u64) -> String {
    format!("https://github.com/test/repo/pull/{number}")
}

/// Pull request targeting `main`
pub fn make_pr(number: u64, head_sha: &str) -> PullRequest {
    PullRequest {
        number,
        html_url: pr_url(number),
        head_sha: head_sha.to_string(),
        base_ref: "main".to_string(),
    }
}

/// Issue view of PR `number` with `labels`
pub fn make_issue(number: u64, labels: &[&str]) -> Issue {
    Issue {
        number,
        html_url: pr_url(number),
        labels: labels.iter().map(ToString::to_string).collect(),
        is_pull_request: true,
    }
}

/// `pull_request` event with `action`
pub fn labeled_event(action: &str, pr: PullRequest) -> Event {
    Event::PullRequestLabeled(PullRequestEvent {
        repo: test_repo(),
        action: action.to_string(),
        pull_request: pr,
    })
}

/// `pull_request_review` event with `review_state`
pub fn review_event(review_state: &str, pr: PullRequest) -> Event {
    Event::ReviewSubmitted(ReviewEvent {
        repo: test_repo(),
        review_state: review_state.to_string(),
        pull_request: pr,
    })
}

/// `status` event for `sha`
pub fn status_event(state: &str, sha: &str) -> Event {
    Event::CommitStatusUpdated(StatusEvent {
        repo: test_repo(),
        sha: sha.to_string(),
        state: state.to_string(),
    })
}
