//! # Report Command Implementation
//!
//! Implements the `report` subcommand: connect to a GitLab instance, walk
//! the given project or group path, and write the branch inventory as a
//! standalone HTML file.
//!
//! The access token is read from the `GITLAB_TOKEN` environment variable
//! only; it is never accepted as a command-line argument, so it cannot leak
//! through shell history or process listings.
//!
//! ## Example
//!
//! ```bash
//! export GITLAB_TOKEN=glpat-...
//! gitlab-branch-report report mygroup/myproject
//! gitlab-branch-report report mygroup -o branches.html
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use gitlab_branch_report::client::RestClient;
use gitlab_branch_report::connection::{Connection, DEFAULT_GITLAB_URL};
use gitlab_branch_report::output::{emoji, OutputConfig};
use gitlab_branch_report::{render, report};

/// Generate an HTML branch report for a project or group
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Project or group path (e.g. mygroup/myproject or mygroup)
    pub path: String,

    /// Output file for the HTML report
    #[arg(short, long, value_name = "FILE", default_value = "gitlab_branch_report.html")]
    pub output: PathBuf,

    /// Base URL of the GitLab instance
    #[arg(long, value_name = "URL", env = "GITLAB_URL", default_value = DEFAULT_GITLAB_URL)]
    pub gitlab_url: String,

    /// Suppress progress output and the final summary line
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `report` command.
pub fn execute(args: ReportArgs, output: &OutputConfig) -> Result<()> {
    let connection = Connection::from_env(&args.gitlab_url)?;
    let client = RestClient::new(connection)?;

    let records = report::generate(&client, &args.path)
        .with_context(|| format!("Failed to generate report for '{}'", args.path))?;

    render::write_report(&records, &args.path, &args.output)
        .with_context(|| format!("Failed to write report to {}", args.output.display()))?;

    if !args.quiet {
        println!(
            "{} Report for '{}' written to {} ({} branches)",
            emoji(output, "📄", "[REPORT]"),
            args.path,
            args.output.display(),
            records.len()
        );
    }

    Ok(())
}
