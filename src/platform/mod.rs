//! Forge services
//!
//! The merge engine talks to the forge only through [`ForgeClient`].

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{CheckRun, CommitStatus, Issue, PullRequest, RepoRef, RequiredContexts};
use async_trait::async_trait;

/// Forge operations the merge engine needs
///
/// Implementations own transport concerns (auth, retries, rate limits).
#[async_trait]
pub trait ForgeClient: Send + Sync {
    /// Get the issue view of a pull request (labels, URL)
    async fn get_issue(&self, repo: &RepoRef, number: u64) -> Result<Issue>;

    /// Get a pull request (head SHA, base branch)
    async fn get_pull_request(&self, repo: &RepoRef, number: u64) -> Result<PullRequest>;

    /// Search open pull requests that reference `sha`
    ///
    /// Search hits may include plain issues; callers check
    /// [`Issue::is_pull_request`].
    async fn search_open_pull_requests_by_commit(
        &self,
        repo: &RepoRef,
        sha: &str,
    ) -> Result<Vec<Issue>>;

    /// List legacy commit statuses for `sha`
    async fn get_combined_status(&self, repo: &RepoRef, sha: &str) -> Result<Vec<CommitStatus>>;

    /// List check runs for `sha`
    async fn list_check_runs(&self, repo: &RepoRef, sha: &str) -> Result<Vec<CheckRun>>;

    /// List the status-check contexts `branch` requires
    ///
    /// Must return [`RequiredContexts::NotConfigured`] when the branch has no
    /// protection, and an error for any other failure.
    async fn list_required_status_check_contexts(
        &self,
        repo: &RepoRef,
        branch: &str,
    ) -> Result<RequiredContexts>;

    /// Merge pull request `number`, only if its head is still `head_sha`
    async fn merge_pull_request(&self, repo: &RepoRef, number: u64, head_sha: &str) -> Result<()>;
}
