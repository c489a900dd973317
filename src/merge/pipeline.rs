//! Per-pull-request evaluation pipeline
//!
//! label gate -> stale-commit gate -> statuses -> requirements -> decision -> merge

use crate::error::Result;
use crate::merge::eligibility::MergeDecision;
use crate::merge::execute::{MergeOutcome, execute_merge};
use crate::merge::requirements::resolve_required_contexts;
use crate::merge::status::collect_statuses;
use crate::platform::ForgeClient;
use crate::types::{Issue, PullRequest, RepoRef};
use tracing::debug;

/// Evaluate one pull request and merge it when eligible.
///
/// `pinned_sha` is the commit the triggering event was about. When set and
/// different from the PR head, evaluation stops with
/// [`MergeOutcome::StaleCommit`]. Without it the current head is used.
pub async fn evaluate_pull_request(
    forge: &dyn ForgeClient,
    repo: &RepoRef,
    issue: &Issue,
    pr: &PullRequest,
    pinned_sha: Option<&str>,
    approved_label: &str,
) -> Result<MergeOutcome> {
    if !issue.has_label(approved_label) {
        debug!(pr = pr.number, approved_label, "approved label not present");
        return Ok(MergeOutcome::NotApproved);
    }

    if let Some(event_sha) = pinned_sha
        && event_sha != pr.head_sha
    {
        debug!(
            pr = pr.number,
            event_sha,
            head_sha = %pr.head_sha,
            "commit SHA is not the PR head"
        );
        return Ok(MergeOutcome::StaleCommit {
            event_sha: event_sha.to_string(),
            head_sha: pr.head_sha.clone(),
        });
    }

    let sha = pr.head_sha.as_str();
    let statuses = collect_statuses(forge, repo, sha, &issue.html_url).await?;
    let required = resolve_required_contexts(forge, repo, &pr.base_ref, &issue.html_url).await?;

    let decision = MergeDecision::decide(sha, &statuses, &required);
    execute_merge(forge, repo, pr, decision).await
}
