//! GitHub forge implementation

use crate::error::{Error, Result};
use crate::platform::ForgeClient;
use crate::types::{CheckRun, CommitStatus, Issue, PullRequest, RepoRef, RequiredContexts};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

const DEFAULT_API_BASE: &str = "https://api.github.com";

#[derive(Deserialize)]
struct CombinedStatusResponse {
    #[serde(default)]
    statuses: Vec<StatusItem>,
}

#[derive(Deserialize)]
struct StatusItem {
    context: String,
    state: String,
}

#[derive(Deserialize)]
struct CheckRunsResponse {
    #[serde(default)]
    check_runs: Vec<CheckRunItem>,
}

#[derive(Deserialize)]
struct CheckRunItem {
    name: String,
    conclusion: Option<String>,
}

/// GitHub service using octocrab
///
/// Status, check-run and branch-protection lookups go over raw HTTP so the
/// response status (notably 404 for unprotected branches) stays visible.
pub struct GitHubService {
    client: Octocrab,
    /// Token for raw HTTP requests
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
    /// API base URL for raw requests, without trailing slash
    api_base: String,
}

impl GitHubService {
    /// Create a service for github.com, or a GitHub Enterprise `host`
    pub fn new(token: &str, host: Option<&str>) -> Result<Self> {
        let api_base = host.map_or_else(
            || DEFAULT_API_BASE.to_string(),
            |h| format!("https://{h}/api/v3"),
        );
        Self::with_api_base(token, &api_base)
    }

    /// Create a service against an explicit API base URL
    pub fn with_api_base(token: &str, api_base: &str) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/').to_string();

        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_base.as_str())
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("automerger")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token: token.to_string(),
            http_client,
            api_base,
        })
    }

    async fn raw_get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{path}", self.api_base);
        debug!(%url, "GET");

        self.http_client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to fetch {path}: {e}")))
    }
}

/// Map a non-2xx response to an error carrying the status and body
async fn ensure_success(response: Response, what: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::GitHubApi(format!("{what} returned {status}: {body}")))
}

fn issue_from_octocrab(issue: &octocrab::models::issues::Issue) -> Issue {
    Issue {
        number: issue.number,
        html_url: issue.html_url.to_string(),
        labels: issue.labels.iter().map(|l| l.name.clone()).collect(),
        is_pull_request: issue.pull_request.is_some(),
    }
}

#[async_trait]
impl ForgeClient for GitHubService {
    async fn get_issue(&self, repo: &RepoRef, number: u64) -> Result<Issue> {
        debug!(%repo, number, "getting issue");
        let issue = self
            .client
            .issues(&repo.owner, &repo.name)
            .get(number)
            .await?;

        let result = issue_from_octocrab(&issue);
        debug!(number, labels = ?result.labels, "got issue");
        Ok(result)
    }

    async fn get_pull_request(&self, repo: &RepoRef, number: u64) -> Result<PullRequest> {
        debug!(%repo, number, "getting pull request");
        let pr = self.client.pulls(&repo.owner, &repo.name).get(number).await?;

        let result = PullRequest {
            number: pr.number,
            html_url: pr
                .html_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            head_sha: pr.head.sha.clone(),
            base_ref: pr.base.ref_field.clone(),
        };
        debug!(
            number,
            head_sha = %result.head_sha,
            base_ref = %result.base_ref,
            "got pull request"
        );
        Ok(result)
    }

    async fn search_open_pull_requests_by_commit(
        &self,
        repo: &RepoRef,
        sha: &str,
    ) -> Result<Vec<Issue>> {
        let query = format!("type:pr state:open repo:{} {sha}", repo.full_name());
        debug!(%query, "searching open pull requests");

        let page = self
            .client
            .search()
            .issues_and_pull_requests(&query)
            .per_page(100)
            .send()
            .await?;

        let result: Vec<Issue> = page.items.iter().map(issue_from_octocrab).collect();
        debug!(count = result.len(), "search complete");
        Ok(result)
    }

    async fn get_combined_status(&self, repo: &RepoRef, sha: &str) -> Result<Vec<CommitStatus>> {
        let path = format!("/repos/{}/{}/commits/{sha}/status", repo.owner, repo.name);
        let response = ensure_success(self.raw_get(&path).await?, "commit status").await?;

        let combined: CombinedStatusResponse = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse commit status: {e}")))?;

        debug!(count = combined.statuses.len(), "fetched commit statuses");
        Ok(combined
            .statuses
            .into_iter()
            .map(|s| CommitStatus {
                context: s.context,
                state: s.state,
            })
            .collect())
    }

    async fn list_check_runs(&self, repo: &RepoRef, sha: &str) -> Result<Vec<CheckRun>> {
        let path = format!(
            "/repos/{}/{}/commits/{sha}/check-runs?per_page=100",
            repo.owner, repo.name
        );
        let response = ensure_success(self.raw_get(&path).await?, "check runs").await?;

        let runs: CheckRunsResponse = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse check runs: {e}")))?;

        debug!(count = runs.check_runs.len(), "fetched check runs");
        Ok(runs
            .check_runs
            .into_iter()
            .map(|r| CheckRun {
                name: r.name,
                conclusion: r.conclusion,
            })
            .collect())
    }

    async fn list_required_status_check_contexts(
        &self,
        repo: &RepoRef,
        branch: &str,
    ) -> Result<RequiredContexts> {
        let path = format!(
            "/repos/{}/{}/branches/{}/protection/required_status_checks/contexts",
            repo.owner,
            repo.name,
            urlencoding::encode(branch)
        );
        let response = self.raw_get(&path).await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(branch, "branch has no required status checks");
            return Ok(RequiredContexts::NotConfigured);
        }

        let response = ensure_success(response, "branch protection").await?;
        let contexts: Vec<String> = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse required contexts: {e}")))?;

        debug!(branch, ?contexts, "fetched required contexts");
        Ok(RequiredContexts::Found(contexts))
    }

    async fn merge_pull_request(&self, repo: &RepoRef, number: u64, head_sha: &str) -> Result<()> {
        debug!(%repo, number, head_sha, "merging pull request");

        let result = self
            .client
            .pulls(&repo.owner, &repo.name)
            .merge(number)
            .sha(head_sha)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Merge failed: {e}")))?;

        if !result.merged {
            return Err(Error::GitHubApi(format!(
                "Merge failed: {}",
                result.message.as_deref().unwrap_or("not merged")
            )));
        }

        debug!(number, sha = ?result.sha, "merge complete");
        Ok(())
    }
}
