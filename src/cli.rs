//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use crate::commands;

/// GitLab Branch Report - Inventory branches across projects and groups
#[derive(Parser, Debug)]
#[command(name = "gitlab-branch-report")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an HTML branch report for a project or group
    Report(commands::report::ReportArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

/// Resolve the effective log level from the `--log-level` flag and the
/// report command's `--quiet` flag. Quiet caps verbosity at warnings so
/// per-project and per-branch progress messages are silenced, without
/// raising a level the user already set below that.
fn log_level(flag: &str, quiet: bool) -> LevelFilter {
    let level = match flag.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    if quiet {
        level.min(LevelFilter::Warn)
    } else {
        level
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let quiet = matches!(&self.command, Commands::Report(args) if args.quiet);
        env_logger::Builder::new()
            .filter_level(log_level(&self.log_level, quiet))
            .format_timestamp(None)
            .init();

        let output = gitlab_branch_report::output::OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Report(args) => commands::report::execute(args, &output),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_defaults_to_info() {
        assert_eq!(log_level("info", false), LevelFilter::Info);
        assert_eq!(log_level("bogus", false), LevelFilter::Info);
    }

    #[test]
    fn test_log_level_parses_named_levels() {
        assert_eq!(log_level("error", false), LevelFilter::Error);
        assert_eq!(log_level("WARN", false), LevelFilter::Warn);
        assert_eq!(log_level("debug", false), LevelFilter::Debug);
        assert_eq!(log_level("trace", false), LevelFilter::Trace);
    }

    #[test]
    fn test_quiet_caps_verbosity_at_warnings() {
        assert_eq!(log_level("info", true), LevelFilter::Warn);
        assert_eq!(log_level("trace", true), LevelFilter::Warn);
    }

    #[test]
    fn test_quiet_keeps_levels_already_below_warn() {
        assert_eq!(log_level("error", true), LevelFilter::Error);
    }
}
