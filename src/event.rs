use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::pr::{self, RepoRef};

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Failed to read event payload: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse event payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The parts of a GitHub webhook payload the notifier reads.
/// Everything else in the payload is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub pull_request: Option<EventPullRequest>,

    #[serde(default)]
    pub repository: Option<EventRepository>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPullRequest {
    #[serde(default)]
    pub number: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventRepository {
    #[serde(default)]
    pub full_name: Option<String>,
}

impl EventPayload {
    /// Load the payload file GitHub Actions points `GITHUB_EVENT_PATH` at.
    pub fn load(path: &Path) -> Result<EventPayload, EventError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// A payload carrying nothing but a pull request number.
    pub fn for_pull_request(number: u64) -> EventPayload {
        EventPayload {
            pull_request: Some(EventPullRequest {
                number: Some(number),
            }),
            repository: None,
        }
    }
}

/// Pull request number of the triggering event, if the event has one.
/// Number 0 is treated as absent.
pub fn pull_request_number(payload: &EventPayload) -> Option<u64> {
    payload
        .pull_request
        .as_ref()
        .and_then(|pr| pr.number)
        .filter(|number| *number != 0)
}

/// Repository named in the payload's `repository.full_name`.
pub fn repository(payload: &EventPayload) -> Option<RepoRef> {
    payload
        .repository
        .as_ref()
        .and_then(|repo| repo.full_name.as_deref())
        .and_then(|full_name| pr::parse_repository(full_name).ok())
}
