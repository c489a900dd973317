//! Merge execution - effectful operations
//!
//! Takes a `MergeDecision` (made by the pure eligibility functions) and
//! performs the merge via the forge API.

use crate::error::{Error, Result};
use crate::merge::eligibility::{Eligibility, MergeDecision};
use crate::platform::ForgeClient;
use crate::types::{PullRequest, RepoRef};
use tracing::{debug, info};

/// Terminal state of evaluating one pull request
///
/// Failures are not an outcome; they are returned as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The approved label is not applied
    NotApproved,
    /// The event refers to a commit that is no longer the PR head
    StaleCommit {
        /// SHA the event was about
        event_sha: String,
        /// Current head of the pull request
        head_sha: String,
    },
    /// Checks do not allow merging yet
    Skipped(Eligibility),
    /// Merge issued successfully
    Merged {
        /// Head commit that was merged
        sha: String,
    },
}

impl MergeOutcome {
    /// Whether the pull request was merged
    pub const fn is_merged(&self) -> bool {
        matches!(self, Self::Merged { .. })
    }
}

/// Execute a merge decision (EFFECTFUL)
///
/// Issues the merge for `decision.sha` when the decision allows it; otherwise
/// reports the skip. Merge failures are wrapped with the PR URL.
pub async fn execute_merge(
    forge: &dyn ForgeClient,
    repo: &RepoRef,
    pr: &PullRequest,
    decision: MergeDecision,
) -> Result<MergeOutcome> {
    if !decision.should_merge() {
        debug!(
            pr = pr.number,
            blockers = ?decision.eligibility.blockers,
            "not merging, checks not satisfied"
        );
        return Ok(MergeOutcome::Skipped(decision.eligibility));
    }

    forge
        .merge_pull_request(repo, pr.number, &decision.sha)
        .await
        .map_err(|e| Error::pull_request("merge pull request", &pr.html_url, e))?;

    info!(%repo, pr = pr.number, sha = %decision.sha, "merged pull request");
    Ok(MergeOutcome::Merged { sha: decision.sha })
}
