//! Mock forge client for testing
//!
//! These are test utilities - not all may be used in current tests.

use async_trait::async_trait;
use automerger::error::{Error, Result};
use automerger::platform::ForgeClient;
use automerger::types::{CheckRun, CommitStatus, Issue, PullRequest, RepoRef, RequiredContexts};
use std::collections::HashMap;
use std::sync::Mutex;

use super::{make_issue, make_pr};

/// Call record for `merge_pull_request`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCall {
    pub number: u64,
    pub sha: String,
}

/// Simple mock forge client
///
/// Hand-written rather than mockall-generated so responses can be set up per
/// PR / commit / branch and every call is recorded.
///
/// Features:
/// - Configurable responses keyed by PR number, SHA or branch
/// - Call tracking for verification
/// - Error injection for failure path testing
#[derive(Default)]
pub struct MockForge {
    issues: Mutex<HashMap<u64, Issue>>,
    pull_requests: Mutex<HashMap<u64, PullRequest>>,
    search_results: Mutex<HashMap<String, Vec<Issue>>>,
    statuses: Mutex<HashMap<String, Vec<CommitStatus>>>,
    check_runs: Mutex<HashMap<String, Vec<CheckRun>>>,
    required: Mutex<HashMap<String, RequiredContexts>>,
    // Call tracking
    calls: Mutex<Vec<String>>,
    merge_calls: Mutex<Vec<MergeCall>>,
    // Error injection
    error_on_search: Mutex<Option<String>>,
    error_on_statuses: Mutex<Option<String>>,
    error_on_check_runs: Mutex<Option<String>>,
    error_on_required: Mutex<Option<String>>,
    error_on_get_pr: Mutex<HashMap<u64, String>>,
    error_on_merge: Mutex<HashMap<u64, String>>,
}

impl MockForge {
    /// Create an empty mock
    pub fn new() -> Self {
        Self::default()
    }

    // === Response setup ===

    /// Register PR `number` (issue + pull request views) targeting `main`
    pub fn setup_pr(&self, number: u64, head_sha: &str, labels: &[&str]) {
        self.issues
            .lock()
            .unwrap()
            .insert(number, make_issue(number, labels));
        self.pull_requests
            .lock()
            .unwrap()
            .insert(number, make_pr(number, head_sha));
    }

    /// Make search for `sha` return these issues
    pub fn set_search_results(&self, sha: &str, issues: Vec<Issue>) {
        self.search_results
            .lock()
            .unwrap()
            .insert(sha.to_string(), issues);
    }

    /// Set legacy statuses for `sha` as (context, state) pairs
    pub fn set_statuses(&self, sha: &str, entries: &[(&str, &str)]) {
        let statuses = entries
            .iter()
            .map(|&(context, state)| CommitStatus {
                context: context.to_string(),
                state: state.to_string(),
            })
            .collect();
        self.statuses
            .lock()
            .unwrap()
            .insert(sha.to_string(), statuses);
    }

    /// Set check runs for `sha` as (name, conclusion) pairs
    pub fn set_check_runs(&self, sha: &str, entries: &[(&str, Option<&str>)]) {
        let runs = entries
            .iter()
            .map(|&(name, conclusion)| CheckRun {
                name: name.to_string(),
                conclusion: conclusion.map(ToString::to_string),
            })
            .collect();
        self.check_runs
            .lock()
            .unwrap()
            .insert(sha.to_string(), runs);
    }

    /// Set the required contexts of `branch` (default: not configured)
    pub fn set_required_contexts(&self, branch: &str, required: RequiredContexts) {
        self.required
            .lock()
            .unwrap()
            .insert(branch.to_string(), required);
    }

    // === Error injection methods ===

    /// Make `search_open_pull_requests_by_commit` return an error
    pub fn fail_search(&self, msg: &str) {
        *self.error_on_search.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `get_combined_status` return an error
    pub fn fail_statuses(&self, msg: &str) {
        *self.error_on_statuses.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_check_runs` return an error
    pub fn fail_check_runs(&self, msg: &str) {
        *self.error_on_check_runs.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_required_status_check_contexts` return an error
    pub fn fail_required(&self, msg: &str) {
        *self.error_on_required.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `get_pull_request` fail for PR `number`
    pub fn fail_get_pr(&self, number: u64, msg: &str) {
        self.error_on_get_pr
            .lock()
            .unwrap()
            .insert(number, msg.to_string());
    }

    /// Make `merge_pull_request` fail for PR `number`
    pub fn fail_merge(&self, number: u64, msg: &str) {
        self.error_on_merge
            .lock()
            .unwrap()
            .insert(number, msg.to_string());
    }

    // === Call verification methods ===

    /// All forge calls in order, formatted as `operation:argument`
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// All `merge_pull_request` calls
    pub fn get_merge_calls(&self) -> Vec<MergeCall> {
        self.merge_calls.lock().unwrap().clone()
    }

    /// Assert that PR `number` was merged at `sha`
    pub fn assert_merged(&self, number: u64, sha: &str) {
        let calls = self.get_merge_calls();
        assert!(
            calls.iter().any(|c| c.number == number && c.sha == sha),
            "Expected merge_pull_request({number}, {sha}) but got: {calls:?}"
        );
    }

    /// Assert that no merge was attempted
    pub fn assert_no_merge(&self) {
        let calls = self.get_merge_calls();
        assert!(calls.is_empty(), "Expected no merge but got: {calls:?}");
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn injected(slot: &Mutex<Option<String>>) -> Result<()> {
    match slot.lock().unwrap().as_ref() {
        Some(msg) => Err(Error::Platform(msg.clone())),
        None => Ok(()),
    }
}

#[async_trait]
impl ForgeClient for MockForge {
    async fn get_issue(&self, _repo: &RepoRef, number: u64) -> Result<Issue> {
        self.record(format!("get_issue:{number}"));
        self.issues
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .ok_or_else(|| {
                Error::Platform(format!("get_issue: no response configured for #{number}"))
            })
    }

    async fn get_pull_request(&self, _repo: &RepoRef, number: u64) -> Result<PullRequest> {
        self.record(format!("get_pull_request:{number}"));
        if let Some(msg) = self.error_on_get_pr.lock().unwrap().get(&number) {
            return Err(Error::Platform(msg.clone()));
        }
        self.pull_requests
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .ok_or_else(|| {
                Error::Platform(format!("get_pull_request: no response configured for #{number}"))
            })
    }

    async fn search_open_pull_requests_by_commit(
        &self,
        _repo: &RepoRef,
        sha: &str,
    ) -> Result<Vec<Issue>> {
        self.record(format!("search:{sha}"));
        injected(&self.error_on_search)?;
        Ok(self
            .search_results
            .lock()
            .unwrap()
            .get(sha)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_combined_status(&self, _repo: &RepoRef, sha: &str) -> Result<Vec<CommitStatus>> {
        self.record(format!("get_combined_status:{sha}"));
        injected(&self.error_on_statuses)?;
        Ok(self
            .statuses
            .lock()
            .unwrap()
            .get(sha)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_check_runs(&self, _repo: &RepoRef, sha: &str) -> Result<Vec<CheckRun>> {
        self.record(format!("list_check_runs:{sha}"));
        injected(&self.error_on_check_runs)?;
        Ok(self
            .check_runs
            .lock()
            .unwrap()
            .get(sha)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_required_status_check_contexts(
        &self,
        _repo: &RepoRef,
        branch: &str,
    ) -> Result<RequiredContexts> {
        self.record(format!("list_required:{branch}"));
        injected(&self.error_on_required)?;
        Ok(self
            .required
            .lock()
            .unwrap()
            .get(branch)
            .cloned()
            .unwrap_or(RequiredContexts::NotConfigured))
    }

    async fn merge_pull_request(&self, _repo: &RepoRef, number: u64, head_sha: &str) -> Result<()> {
        self.record(format!("merge:{number}"));
        self.merge_calls.lock().unwrap().push(MergeCall {
            number,
            sha: head_sha.to_string(),
        });
        if let Some(msg) = self.error_on_merge.lock().unwrap().get(&number) {
            return Err(Error::Platform(msg.clone()));
        }
        Ok(())
    }
}
