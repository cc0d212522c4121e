use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::config::ConfigError;
use crate::event::{self, EventError, EventPayload};
use crate::matcher::PatternSet;
use crate::notify;
use crate::pr::{self, PrError, PrState, PullRequestApi, RepoRef};
use crate::report::Outcome;

/// Anything that fails a run. No stage recovers locally; every error ends
/// up here and marks the run as failed.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Event(#[from] EventError),

    #[error(transparent)]
    Pr(#[from] PrError),

    #[error("Could not determine the repository; set GITHUB_REPOSITORY or pass --repository")]
    MissingRepository,
}

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub modelix_url: String,
    /// Stop before posting the comment
    pub dry_run: bool,
}

/// Decide whether the pull request of `payload` touches MPS artifacts and,
/// if it does, post the Modelix diff link on it.
///
/// Closed or locked pull requests are skipped before their files are listed.
/// The repository is only required once the payload names a pull request.
pub async fn run(
    api: &dyn PullRequestApi,
    payload: &EventPayload,
    repo: Option<&RepoRef>,
    settings: &RunSettings,
) -> Result<Outcome, RunError> {
    let Some(number) = event::pull_request_number(payload) else {
        warn!("could not get pull request number from context, exiting");
        return Ok(Outcome::NoPullRequest);
    };
    let repo = repo.ok_or(RunError::MissingRepository)?;

    process(api, repo, number, settings).await
}

#[instrument(name = "pull_request", skip(api, settings), fields(repo = %repo))]
async fn process(
    api: &dyn PullRequestApi,
    repo: &RepoRef,
    number: u64,
    settings: &RunSettings,
) -> Result<Outcome, RunError> {
    let pull_request = api.get_pull_request(repo, number).await?;

    if pull_request.state == PrState::Closed {
        info!("pull request is closed, skipping");
        return Ok(Outcome::Closed { number });
    }
    if pull_request.locked {
        info!("pull request is locked, skipping");
        return Ok(Outcome::Locked { number });
    }

    debug!("fetching changed files");
    let files = pr::collect_changed_files(api, repo, number).await?;

    let Some(matched) = PatternSet::mps().first_match(&files) else {
        info!(files = files.len(), "no MPS files changed");
        return Ok(Outcome::NoMatch {
            number,
            files: files.len(),
        });
    };
    debug!(%matched, "matched");
    let matched = matched.to_string();

    if settings.dry_run {
        let body = notify::compose(&settings.modelix_url, repo, &pull_request);
        info!("dry run, not posting comment");
        return Ok(Outcome::DryRun { number, matched, body });
    }

    let body = notify::notify(api, repo, &pull_request, &settings.modelix_url).await?;
    Ok(Outcome::Commented { number, matched, body })
}
