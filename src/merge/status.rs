//! Status aggregation
//!
//! GitHub has two CI systems:
//! 1. Commit Status API (legacy) - used by external CI services
//! 2. Check Runs API (modern) - used by GitHub Actions
//!
//! Both are folded into one map keyed by context name. Check runs are applied
//! last so they win over a legacy status with the same name.

use crate::error::{Error, Result};
use crate::platform::ForgeClient;
use crate::types::{CheckRun, CommitStatus, RepoRef};
use std::collections::BTreeMap;
use tracing::debug;

/// Context name to "passed"
pub type StatusMap = BTreeMap<String, bool>;

/// Fold statuses and check runs into one map (PURE)
pub fn aggregate_statuses(statuses: &[CommitStatus], check_runs: &[CheckRun]) -> StatusMap {
    let mut map = StatusMap::new();

    for status in statuses {
        debug!(context = %status.context, state = %status.state, "found status");
        map.insert(status.context.clone(), status.is_success());
    }

    for run in check_runs {
        debug!(name = %run.name, conclusion = ?run.conclusion, "found check run");
        map.insert(run.name.clone(), run.is_success());
    }

    map
}

/// Fetch statuses, then check runs, for `sha` and aggregate them.
///
/// `pr_url` only labels errors.
pub async fn collect_statuses(
    forge: &dyn ForgeClient,
    repo: &RepoRef,
    sha: &str,
    pr_url: &str,
) -> Result<StatusMap> {
    let statuses = forge
        .get_combined_status(repo, sha)
        .await
        .map_err(|e| Error::pull_request("get statuses of pull request", pr_url, e))?;

    let check_runs = forge
        .list_check_runs(repo, sha)
        .await
        .map_err(|e| Error::pull_request("retrieve checks for pull request", pr_url, e))?;

    Ok(aggregate_statuses(&statuses, &check_runs))
}
