//! Core types for automerger

use std::fmt;

/// Status state / check conclusion that counts as passing
pub const SUCCESS: &str = "success";

/// Repository identity (owner + name)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoRef {
    /// Create a repository reference
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// `owner/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Issue view of a pull request (carries the labels)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Issue/PR number
    pub number: u64,
    /// Web URL
    pub html_url: String,
    /// Label names
    pub labels: Vec<String>,
    /// Whether this issue is backed by a pull request
    pub is_pull_request: bool,
}

impl Issue {
    /// Whether `label` is applied (exact match)
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// A pull request, reduced to what merging needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Current head commit SHA
    pub head_sha: String,
    /// Base (target) branch name
    pub base_ref: String,
}

/// Legacy commit status entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitStatus {
    /// Status context, e.g. "ci/build"
    pub context: String,
    /// "success", "pending", "failure" or "error"
    pub state: String,
}

impl CommitStatus {
    /// Whether this status reports success
    pub fn is_success(&self) -> bool {
        self.state == SUCCESS
    }
}

/// Check run entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRun {
    /// Check run name (shares the namespace with status contexts)
    pub name: String,
    /// Conclusion, `None` while the run is still in progress
    pub conclusion: Option<String>,
}

impl CheckRun {
    /// Whether this run concluded successfully
    pub fn is_success(&self) -> bool {
        self.conclusion.as_deref() == Some(SUCCESS)
    }
}

/// Required status-check contexts declared by a branch.
///
/// Lookup failures travel in the `Err` arm of the surrounding `Result`, so a
/// missing protection rule and a broken lookup can never be confused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequiredContexts {
    /// Branch has no protection / no required status checks
    NotConfigured,
    /// Contexts the branch requires (may be empty)
    Found(Vec<String>),
}

impl RequiredContexts {
    /// Required context names; empty for `NotConfigured`
    pub fn contexts(&self) -> &[String] {
        match self {
            Self::NotConfigured => &[],
            Self::Found(contexts) => contexts,
        }
    }

    /// Whether no context is required
    pub fn is_empty(&self) -> bool {
        self.contexts().is_empty()
    }
}
