mod config;
mod event;
mod matcher;
mod notify;
mod pr;
mod report;
mod run;

use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::EnvFilter;

use crate::event::EventPayload;
use crate::pr::{GitHubClient, RepoRef};
use crate::report::{Annotation, Outcome};
use crate::run::{RunError, RunSettings};

/// Modelix diff notifier: comments a Modelix diff link on pull requests that
/// change MPS models, languages or solutions.
///
/// Inputs are read from the command line, the GitHub Actions `INPUT_*`
/// variables and `.modelix-notifier.toml`, in that order.
#[derive(Parser, Debug)]
#[command(name = "modelix-diff-notifier", version, about)]
struct Cli {
    /// Token for the GitHub API (action input `repo-token`)
    #[arg(long)]
    repo_token: Option<String>,

    /// Base URL of the Modelix instance (action input `modelix-url`)
    #[arg(long)]
    modelix_url: Option<String>,

    /// Repository as owner/name; defaults to GITHUB_REPOSITORY
    #[arg(long)]
    repository: Option<String>,

    /// Event payload file; defaults to GITHUB_EVENT_PATH
    #[arg(long)]
    event_path: Option<PathBuf>,

    /// Check a pull request by URL instead of reading the event payload
    /// (e.g., https://github.com/org/repo/pull/42)
    #[arg(long, conflicts_with = "event_path")]
    pr_url: Option<String>,

    /// Config file path (default: .modelix-notifier.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report what would be posted without creating the comment
    #[arg(long)]
    dry_run: bool,

    /// Markdown file to append the outcome to; defaults to GITHUB_STEP_SUMMARY
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = execute(&cli).await {
        error!(error = %err, "run failed");
        report::annotate(Annotation::Error, &err.to_string());
        std::process::exit(1);
    }
}

#[instrument(name = "modelix_diff", skip(cli))]
async fn execute(cli: &Cli) -> Result<(), RunError> {
    info!("loading configuration");
    let overrides = config::Overrides {
        repo_token: cli.repo_token.clone(),
        modelix_url: cli.modelix_url.clone(),
        repository: cli.repository.clone(),
    };
    let settings = config::Config::load(cli.config.as_deref())?
        .apply_env()
        .apply_overrides(&overrides)
        .resolve()?;
    debug!(api_url = %settings.api_url, modelix_url = %settings.modelix_url, "resolved settings");

    let (payload, url_repo) = match &cli.pr_url {
        Some(url) => {
            let target = pr::parse_pr_url(url)?;
            (EventPayload::for_pull_request(target.number), Some(target.repo))
        }
        None => (load_payload(cli.event_path.clone())?, None),
    };

    let repo = resolve_repo(url_repo, settings.repository.clone(), &payload);
    if let Some(repo) = &repo {
        debug!(repo = %repo, "resolved repository");
    }

    let client = GitHubClient::new(&settings.api_url, settings.token.clone())?;
    let run_settings = RunSettings {
        modelix_url: settings.modelix_url.clone(),
        dry_run: cli.dry_run,
    };
    let outcome = run::run(&client, &payload, repo.as_ref(), &run_settings).await?;

    if outcome == Outcome::NoPullRequest {
        report::annotate(
            Annotation::Warning,
            "Could not get pull request number from context, exiting",
        );
    }

    let summary = cli
        .summary
        .clone()
        .or_else(|| std::env::var_os("GITHUB_STEP_SUMMARY").map(PathBuf::from));
    // A comment may already be posted; summary failures never fail the run.
    if let Err(err) = report::output(&outcome, summary.as_deref()) {
        warn!(error = %err, "could not write job summary");
        report::annotate(Annotation::Warning, &err.to_string());
    }
    info!(outcome = %outcome, "done");

    Ok(())
}

/// Read the event payload. Without a payload file the run behaves as if
/// the event carried no pull request.
fn load_payload(path: Option<PathBuf>) -> Result<EventPayload, RunError> {
    let path = path.or_else(|| std::env::var_os("GITHUB_EVENT_PATH").map(PathBuf::from));
    match path {
        Some(path) if path.exists() => {
            debug!(path = %path.display(), "reading event payload");
            Ok(EventPayload::load(&path)?)
        }
        _ => {
            debug!("no event payload file");
            Ok(EventPayload::default())
        }
    }
}

/// A PR URL names its repository; otherwise configuration wins over the payload.
fn resolve_repo(
    from_url: Option<RepoRef>,
    configured: Option<RepoRef>,
    payload: &EventPayload,
) -> Option<RepoRef> {
    from_url.or(configured).or_else(|| event::repository(payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(owner: &str, name: &str) -> RepoRef {
        RepoRef {
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_resolve_repo_precedence() {
        let payload: EventPayload =
            serde_json::from_str(r#"{ "repository": { "full_name": "payload/repo" } }"#).unwrap();

        let url = resolve_repo(Some(repo("url", "repo")), Some(repo("cfg", "repo")), &payload);
        assert_eq!(url, Some(repo("url", "repo")));

        let configured = resolve_repo(None, Some(repo("cfg", "repo")), &payload);
        assert_eq!(configured, Some(repo("cfg", "repo")));

        let from_payload = resolve_repo(None, None, &payload);
        assert_eq!(from_payload, Some(repo("payload", "repo")));
    }

    #[test]
    fn test_resolve_repo_missing() {
        assert_eq!(resolve_repo(None, None, &EventPayload::default()), None);
    }

    #[test]
    fn test_missing_payload_file_means_no_pull_request() {
        let dir = tempfile::tempdir().unwrap();
        let payload = load_payload(Some(dir.path().join("event.json"))).unwrap();
        assert_eq!(event::pull_request_number(&payload), None);
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from([
            "modelix-diff-notifier",
            "--modelix-url",
            "https://modelix.example",
            "--pr-url",
            "https://github.com/acme/widgets/pull/42",
            "--dry-run",
        ]);
        assert_eq!(cli.modelix_url.as_deref(), Some("https://modelix.example"));
        assert!(cli.dry_run);
        assert!(cli.event_path.is_none());
    }
}
