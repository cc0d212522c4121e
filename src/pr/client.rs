use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, instrument};

use super::types::{ChangedFile, PullRequest, RepoRef};
use super::PrError;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("modelix-diff-notifier/", env!("CARGO_PKG_VERSION"));

/// The three GitHub operations the notifier depends on.
/// Send + Sync so the orchestrator can hold it behind `&dyn`.
#[async_trait]
pub trait PullRequestApi: Send + Sync {
    async fn get_pull_request(&self, repo: &RepoRef, number: u64) -> Result<PullRequest, PrError>;

    /// One page of the files changed in a pull request. An empty page marks the end.
    async fn list_files(
        &self,
        repo: &RepoRef,
        number: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ChangedFile>, PrError>;

    async fn create_comment(&self, repo: &RepoRef, issue_number: u64, body: &str) -> Result<(), PrError>;
}

/// GitHub REST client backed by reqwest.
pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(api_url: &str, token: impl Into<String>) -> Result<Self, PrError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_http(http, api_url, token))
    }

    pub fn with_http(http: Client, api_url: &str, token: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn endpoint(&self, repo: &RepoRef, path: &str) -> String {
        format!("{}/repos/{}/{}/{}", self.api_url, repo.owner, repo.name, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }
}

/// Turn a non-2xx response into `PrError::Status`, keeping the body for the log.
async fn check_status(response: Response) -> Result<Response, PrError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(PrError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl PullRequestApi for GitHubClient {
    #[instrument(skip(self), fields(repo = %repo))]
    async fn get_pull_request(&self, repo: &RepoRef, number: u64) -> Result<PullRequest, PrError> {
        let url = self.endpoint(repo, &format!("pulls/{number}"));
        debug!(%url, "fetching pull request");
        let response = self.authorized(self.http.get(&url)).send().await?;
        let pull_request = check_status(response).await?.json::<PullRequest>().await?;
        debug!(state = %pull_request.state, locked = pull_request.locked, "received pull request");
        Ok(pull_request)
    }

    #[instrument(skip(self), fields(repo = %repo))]
    async fn list_files(
        &self,
        repo: &RepoRef,
        number: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ChangedFile>, PrError> {
        let url = self.endpoint(repo, &format!("pulls/{number}/files"));
        let response = self
            .authorized(self.http.get(&url))
            .query(&[("per_page", per_page), ("page", page)])
            .send()
            .await?;
        Ok(check_status(response).await?.json::<Vec<ChangedFile>>().await?)
    }

    #[instrument(skip(self, body), fields(repo = %repo))]
    async fn create_comment(&self, repo: &RepoRef, issue_number: u64, body: &str) -> Result<(), PrError> {
        let url = self.endpoint(repo, &format!("issues/{issue_number}/comments"));
        let response = self
            .authorized(self.http.post(&url))
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await?;
        check_status(response).await?;
        debug!("comment created");
        Ok(())
    }
}
