use tracing::{info, instrument};

use crate::pr::{PrError, PullRequest, PullRequestApi, RepoRef};

/// Link to the Modelix diff view between two commits of a GitHub repository.
pub fn diff_url(modelix_url: &str, repo: &RepoRef, base_sha: &str, head_sha: &str) -> String {
    format!(
        "{}/github/{}/{}/diff/{}/{}",
        modelix_url.trim_end_matches('/'),
        repo.owner,
        repo.name,
        base_sha,
        head_sha
    )
}

pub fn comment_body(url: &str) -> String {
    format!("You can view the diff at: {url}")
}

/// Comment body linking the PR's base and head commits.
pub fn compose(modelix_url: &str, repo: &RepoRef, pr: &PullRequest) -> String {
    comment_body(&diff_url(modelix_url, repo, &pr.base.sha, &pr.head.sha))
}

/// Post the diff link as a comment on the pull request. Returns the posted body.
///
/// Each call posts a new comment; earlier comments are not looked up.
#[instrument(skip(api, pr), fields(repo = %repo, pr = pr.number))]
pub async fn notify(
    api: &dyn PullRequestApi,
    repo: &RepoRef,
    pr: &PullRequest,
    modelix_url: &str,
) -> Result<String, PrError> {
    let body = compose(modelix_url, repo, pr);
    api.create_comment(repo, pr.number, &body).await?;
    info!("posted diff link");
    Ok(body)
}
