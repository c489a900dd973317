//! Required status-check resolution for the target branch

use crate::error::{Error, Result};
use crate::platform::ForgeClient;
use crate::types::{RepoRef, RequiredContexts};
use tracing::debug;

/// Resolve the contexts `branch` requires before merging.
///
/// An unprotected branch yields [`RequiredContexts::NotConfigured`]; any
/// other lookup failure is wrapped with the branch and `pr_url`.
pub async fn resolve_required_contexts(
    forge: &dyn ForgeClient,
    repo: &RepoRef,
    branch: &str,
    pr_url: &str,
) -> Result<RequiredContexts> {
    let required = forge
        .list_required_status_check_contexts(repo, branch)
        .await
        .map_err(|e| {
            Error::pull_request(
                format!("get target branch ({branch}) protection for pull request"),
                pr_url,
                e,
            )
        })?;

    match &required {
        RequiredContexts::NotConfigured => debug!(branch, "no branch protection"),
        RequiredContexts::Found(contexts) => debug!(branch, ?contexts, "required contexts"),
    }
    Ok(required)
}
