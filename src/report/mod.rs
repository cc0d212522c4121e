pub mod types;

pub use types::{Annotation, Outcome};

use colored::Colorize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write job summary: {0}")]
    FileWrite(#[from] std::io::Error),
}

/// Print the outcome to the terminal and, when a summary path is known,
/// append it as markdown. GitHub renders `GITHUB_STEP_SUMMARY` on the run page.
#[instrument(skip(outcome), fields(pr = outcome.pr_number()))]
pub fn output(outcome: &Outcome, summary_path: Option<&Path>) -> Result<(), ReportError> {
    print_terminal(outcome);
    if let Some(path) = summary_path {
        debug!(path = %path.display(), "appending job summary");
        append_summary(outcome, path)?;
    }
    Ok(())
}

/// Emit a workflow command so the message shows up as an annotation on the run.
pub fn annotate(kind: Annotation, message: &str) {
    println!("{}", workflow_command(kind, message));
}

fn workflow_command(kind: Annotation, message: &str) -> String {
    format!("::{}::{}", kind, escape_data(message))
}

/// Workflow command data must not contain raw `%`, CR or LF.
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn print_terminal(outcome: &Outcome) {
    let status = match outcome {
        Outcome::Commented { .. } => "COMMENTED".green().bold(),
        Outcome::DryRun { .. } => "DRY RUN".yellow().bold(),
        _ => "SKIPPED".dimmed(),
    };
    println!("{} {}", status, outcome);
    if let Some(body) = outcome.body() {
        println!("  {}", body);
    }
}

fn summary_markdown(outcome: &Outcome) -> String {
    let mut md = String::from("### Modelix diff\n\n");
    md.push_str(&format!("{}\n", outcome));
    if let Some(body) = outcome.body() {
        md.push_str(&format!("\n> {}\n", body));
    }
    md.push('\n');
    md
}

fn append_summary(outcome: &Outcome, path: &Path) -> Result<(), ReportError> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(summary_markdown(outcome).as_bytes())?;
    Ok(())
}
