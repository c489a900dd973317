//! Event routing
//!
//! Filters events on action/state, finds the pull request(s) they implicate
//! and runs the merge pipeline for each.

use crate::config::RepoConfig;
use crate::error::{Error, ErrorBatch, Result};
use crate::event::{Event, PullRequestEvent, ReviewEvent, StatusEvent};
use crate::merge::{MergeOutcome, evaluate_pull_request};
use crate::platform::ForgeClient;
use crate::types::{PullRequest, RepoRef};
use tracing::debug;

const LABELED_ACTION: &str = "labeled";
const APPROVED_REVIEW_STATE: &str = "approved";
const SUCCESS_STATE: &str = "success";

/// Handle one event: merge every implicated pull request that is eligible.
///
/// Gated-out events, unapproved or stale pull requests and unmet checks all
/// return `Ok(())`. Only forge failures are errors.
pub async fn handle_event(
    event: &Event,
    forge: &dyn ForgeClient,
    config: &RepoConfig,
) -> Result<()> {
    let Some(approved_label) = config.approved_label() else {
        debug!(repo = %event.repo(), "auto-merge disabled, no approved label configured");
        return Ok(());
    };

    match event {
        Event::PullRequestLabeled(e) => handle_pull_request(e, forge, approved_label).await,
        Event::ReviewSubmitted(e) => handle_review(e, forge, approved_label).await,
        Event::CommitStatusUpdated(e) => handle_status(e, forge, approved_label).await,
    }
}

async fn handle_pull_request(
    event: &PullRequestEvent,
    forge: &dyn ForgeClient,
    approved_label: &str,
) -> Result<()> {
    if !event.action.eq_ignore_ascii_case(LABELED_ACTION) {
        debug!(
            action = %event.action,
            pr = event.pull_request.number,
            "skipping pull request event, not a label event"
        );
        return Ok(());
    }

    merge_from_pull_request(&event.repo, &event.pull_request, forge, approved_label).await
}

async fn handle_review(
    event: &ReviewEvent,
    forge: &dyn ForgeClient,
    approved_label: &str,
) -> Result<()> {
    if !event.review_state.eq_ignore_ascii_case(APPROVED_REVIEW_STATE) {
        debug!(
            state = %event.review_state,
            pr = event.pull_request.number,
            "skipping review event, review not approved"
        );
        return Ok(());
    }

    merge_from_pull_request(&event.repo, &event.pull_request, forge, approved_label).await
}

async fn handle_status(
    event: &StatusEvent,
    forge: &dyn ForgeClient,
    approved_label: &str,
) -> Result<()> {
    if !event.state.eq_ignore_ascii_case(SUCCESS_STATE) {
        debug!(state = %event.state, sha = %event.sha, "skipping status event, not success");
        return Ok(());
    }

    let repo = &event.repo;
    let issues = forge
        .search_open_pull_requests_by_commit(repo, &event.sha)
        .await
        .map_err(|e| Error::Search {
            sha: event.sha.clone(),
            source: Box::new(e),
        })?;

    let mut failures = ErrorBatch::new();
    for issue in issues.iter().filter(|i| i.is_pull_request) {
        let Some(pr) = failures.absorb(
            forge
                .get_pull_request(repo, issue.number)
                .await
                .map_err(|e| Error::pull_request("get pull request", &issue.html_url, e)),
        ) else {
            continue;
        };

        if let Some(outcome) = failures.absorb(
            evaluate_pull_request(forge, repo, issue, &pr, Some(&event.sha), approved_label).await,
        ) {
            log_outcome(repo, pr.number, &outcome);
        }
    }

    failures.into_result()
}

async fn merge_from_pull_request(
    repo: &RepoRef,
    pr: &PullRequest,
    forge: &dyn ForgeClient,
    approved_label: &str,
) -> Result<()> {
    let issue = forge
        .get_issue(repo, pr.number)
        .await
        .map_err(|e| Error::pull_request("get pull request", &pr.html_url, e))?;

    let outcome = evaluate_pull_request(forge, repo, &issue, pr, None, approved_label).await?;
    log_outcome(repo, pr.number, &outcome);
    Ok(())
}

fn log_outcome(repo: &RepoRef, pr: u64, outcome: &MergeOutcome) {
    debug!(%repo, pr, ?outcome, "pull request evaluated");
}
