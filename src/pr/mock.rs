//! In-memory `PullRequestApi` that records every call, for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::client::PullRequestApi;
use super::types::{ChangedFile, CommitRef, PrState, PullRequest, RepoRef};
use super::PrError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetPullRequest(u64),
    ListFiles { number: u64, page: u32, per_page: u32 },
    CreateComment { issue_number: u64, body: String },
}

pub struct MockApi {
    pull_request: PullRequest,
    pages: Vec<Vec<String>>,
    fail_list_at: Option<u32>,
    fail_comment: bool,
    calls: Mutex<Vec<Call>>,
}

impl MockApi {
    /// Open, unlocked PR #42 (`aaa`..`bbb`) whose files are served as the given pages.
    pub fn with_files(pages: Vec<Vec<String>>) -> Self {
        Self {
            pull_request: PullRequest {
                number: 42,
                state: PrState::Open,
                locked: false,
                base: CommitRef {
                    sha: "aaa".to_string(),
                },
                head: CommitRef {
                    sha: "bbb".to_string(),
                },
            },
            pages,
            fail_list_at: None,
            fail_comment: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Pages of generated names `file-{page}-{index}.txt` with the given sizes.
    pub fn with_pages(sizes: &[usize]) -> Self {
        let pages = sizes
            .iter()
            .enumerate()
            .map(|(p, size)| (0..*size).map(|i| format!("file-{}-{}.txt", p + 1, i)).collect())
            .collect();
        Self::with_files(pages)
    }

    pub fn state(mut self, state: PrState) -> Self {
        self.pull_request.state = state;
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.pull_request.locked = locked;
        self
    }

    pub fn failing_list_at(mut self, page: u32) -> Self {
        self.fail_list_at = Some(page);
        self
    }

    pub fn failing_comment(mut self) -> Self {
        self.fail_comment = true;
        self
    }

    pub fn repo(&self) -> RepoRef {
        RepoRef {
            owner: "acme".to_string(),
            name: "widgets".to_string(),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_pages(&self) -> Vec<u32> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::ListFiles { page, .. } => Some(page),
                _ => None,
            })
            .collect()
    }

    pub fn page_sizes(&self) -> Vec<u32> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::ListFiles { per_page, .. } => Some(per_page),
                _ => None,
            })
            .collect()
    }

    pub fn comments(&self) -> Vec<(u64, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateComment { issue_number, body } => Some((issue_number, body)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PullRequestApi for MockApi {
    async fn get_pull_request(&self, _repo: &RepoRef, number: u64) -> Result<PullRequest, PrError> {
        self.record(Call::GetPullRequest(number));
        Ok(self.pull_request.clone())
    }

    async fn list_files(
        &self,
        _repo: &RepoRef,
        number: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ChangedFile>, PrError> {
        self.record(Call::ListFiles {
            number,
            page,
            per_page,
        });
        if self.fail_list_at == Some(page) {
            return Err(PrError::Status {
                status: 502,
                body: "bad gateway".to_string(),
            });
        }
        let files = self
            .pages
            .get(page as usize - 1)
            .map(|names| {
                names
                    .iter()
                    .map(|name| ChangedFile {
                        filename: name.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(files)
    }

    async fn create_comment(&self, _repo: &RepoRef, issue_number: u64, body: &str) -> Result<(), PrError> {
        self.record(Call::CreateComment {
            issue_number,
            body: body.to_string(),
        });
        if self.fail_comment {
            return Err(PrError::Status {
                status: 403,
                body: "Resource not accessible by integration".to_string(),
            });
        }
        Ok(())
    }
}
