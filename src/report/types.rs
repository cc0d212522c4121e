/// How a run ended. Every variant is a successful completion; failures are
/// reported through `RunError` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The triggering event carried no pull request
    NoPullRequest,
    /// The pull request is closed
    Closed { number: u64 },
    /// The pull request conversation is locked
    Locked { number: u64 },
    /// None of the changed files is an MPS artifact
    NoMatch { number: u64, files: usize },
    /// The diff link was posted
    Commented {
        number: u64,
        matched: String,
        body: String,
    },
    /// A file matched but posting was skipped (`--dry-run`)
    DryRun {
        number: u64,
        matched: String,
        body: String,
    },
}

impl Outcome {
    /// Comment body that was (or would have been) posted.
    pub fn body(&self) -> Option<&str> {
        match self {
            Outcome::Commented { body, .. } | Outcome::DryRun { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn pr_number(&self) -> Option<u64> {
        match self {
            Outcome::NoPullRequest => None,
            Outcome::Closed { number }
            | Outcome::Locked { number }
            | Outcome::NoMatch { number, .. }
            | Outcome::Commented { number, .. }
            | Outcome::DryRun { number, .. } => Some(*number),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::NoPullRequest => write!(f, "no pull request in event, nothing to do"),
            Outcome::Closed { number } => write!(f, "pull request #{number} is closed, skipped"),
            Outcome::Locked { number } => write!(f, "pull request #{number} is locked, skipped"),
            Outcome::NoMatch { number, files } => {
                write!(f, "pull request #{number}: none of {files} changed files are MPS artifacts")
            }
            Outcome::Commented { number, matched, .. } => {
                write!(f, "pull request #{number}: {matched} changed, diff link posted")
            }
            Outcome::DryRun { number, matched, .. } => {
                write!(f, "pull request #{number}: {matched} changed, diff link not posted (dry run)")
            }
        }
    }
}

/// Severity of a GitHub Actions workflow command annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    Warning,
    Error,
}

impl std::fmt::Display for Annotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Annotation::Warning => write!(f, "warning"),
            Annotation::Error => write!(f, "error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(
            Outcome::Closed { number: 3 }.to_string(),
            "pull request #3 is closed, skipped"
        );
        assert_eq!(
            Outcome::NoMatch { number: 3, files: 2 }.to_string(),
            "pull request #3: none of 2 changed files are MPS artifacts"
        );
    }

    #[test]
    fn test_outcome_body() {
        let commented = Outcome::Commented {
            number: 42,
            matched: "model/Foo.mps".to_string(),
            body: "You can view the diff at: x".to_string(),
        };
        assert_eq!(commented.body(), Some("You can view the diff at: x"));
        assert_eq!(commented.pr_number(), Some(42));
        assert_eq!(Outcome::NoPullRequest.body(), None);
        assert_eq!(Outcome::NoPullRequest.pr_number(), None);
    }

    #[test]
    fn test_annotation_display() {
        assert_eq!(Annotation::Warning.to_string(), "warning");
        assert_eq!(Annotation::Error.to_string(), "error");
    }
}
