pub mod client;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use client::{GitHubClient, PullRequestApi};
pub use types::{PrState, PullRequest, RepoRef};

use thiserror::Error;
use tracing::{debug, instrument};
use types::PrTarget;

/// Page size requested from the "list pull request files" endpoint.
pub const PAGE_SIZE: u32 = 100;

#[derive(Debug, Error)]
pub enum PrError {
    #[error("GitHub API request failed: {0}")]
    ApiRequest(#[from] reqwest::Error),

    #[error("GitHub API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid PR URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid repository '{0}', expected owner/name")]
    InvalidRepository(String),
}

/// Parse `owner/name` into a [`RepoRef`].
pub fn parse_repository(value: &str) -> Result<RepoRef, PrError> {
    let Some((owner, name)) = value.trim().split_once('/') else {
        return Err(PrError::InvalidRepository(value.to_string()));
    };
    if owner.is_empty() || name.is_empty() || name.contains('/') {
        return Err(PrError::InvalidRepository(value.to_string()));
    }
    Ok(RepoRef {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}

/// Parse a pull request page URL, `https://github.com/{owner}/{repo}/pull/{number}`.
/// The `files`, `commits` and `checks` tabs of the same page are accepted too.
pub fn parse_pr_url(url: &str) -> Result<PrTarget, PrError> {
    let invalid = || PrError::InvalidUrl(url.to_string());

    let parsed = reqwest::Url::parse(url).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str() != Some("github.com") {
        return Err(invalid());
    }

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    match segments.as_slice() {
        [owner, name, "pull", number] | [owner, name, "pull", number, "files" | "commits" | "checks"] => {
            let number = number
                .parse::<u64>()
                .ok()
                .filter(|n| *n != 0)
                .ok_or_else(invalid)?;
            Ok(PrTarget {
                repo: RepoRef {
                    owner: owner.to_string(),
                    name: name.to_string(),
                },
                number,
            })
        }
        _ => Err(invalid()),
    }
}

/// Collect every changed filename of a pull request.
///
/// Pages are requested one at a time starting at 1 until the API returns an
/// empty page; filenames keep the order the API returned them in.
#[instrument(skip(api), fields(repo = %repo))]
pub async fn collect_changed_files(
    api: &dyn PullRequestApi,
    repo: &RepoRef,
    number: u64,
) -> Result<Vec<String>, PrError> {
    let mut changed = Vec::new();
    let mut page = 1;

    loop {
        let batch = api.list_files(repo, number, page, PAGE_SIZE).await?;
        if batch.is_empty() {
            break;
        }

        debug!(page, count = batch.len(), "found changed files");
        for file in &batch {
            debug!("  {}", file.filename);
        }

        changed.extend(batch.into_iter().map(|file| file.filename));
        page += 1;
    }

    debug!(pages = page, total = changed.len(), "collected changed files");
    Ok(changed)
}
