use serde::Deserialize;

/// Pull request as returned by `GET /repos/{owner}/{repo}/pulls/{number}`.
/// Only the fields the notifier reads are deserialized.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    /// PR number (e.g., 42)
    pub number: u64,
    /// Open or closed
    pub state: PrState,
    /// Conversation locked by a maintainer
    #[serde(default)]
    pub locked: bool,
    /// Commit the PR is based on
    pub base: CommitRef,
    /// Tip of the PR branch
    pub head: CommitRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    Open,
    Closed,
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrState::Open => write!(f, "open"),
            PrState::Closed => write!(f, "closed"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitRef {
    pub sha: String,
}

/// One entry of `GET /repos/{owner}/{repo}/pulls/{number}/files`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangedFile {
    pub filename: String,
}

/// Repository coordinates, parsed from `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A pull request addressed by URL, for runs outside of a workflow event.
#[derive(Debug, Clone)]
pub struct PrTarget {
    pub repo: RepoRef,
    pub number: u64,
}
