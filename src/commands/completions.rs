//! # Completions Command Implementation
//!
//! Implements the `completions` subcommand, which generates shell completion
//! scripts via `clap_complete` so users can tab-complete commands and
//! options.
//!
//! ## Example
//!
//! ```bash
//! # Generate and install bash completions
//! gitlab-branch-report completions bash > \
//!     ~/.local/share/bash-completion/completions/gitlab-branch-report
//!
//! # Generate zsh completions
//! gitlab-branch-report completions zsh > ~/.zfunc/_gitlab-branch-report
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory, ValueEnum};
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

/// Shell types for completion generation
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompletionShell {
    /// Bourne Again Shell
    Bash,
    /// Z Shell
    Zsh,
    /// Fish Shell
    Fish,
    /// PowerShell
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish Shell
    Elvish,
}

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Shell::Bash,
            CompletionShell::Zsh => Shell::Zsh,
            CompletionShell::Fish => Shell::Fish,
            CompletionShell::PowerShell => Shell::PowerShell,
            CompletionShell::Elvish => Shell::Elvish,
        }
    }
}

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}

/// Execute the `completions` command.
///
/// Writes the completion script for the requested shell to stdout; users
/// redirect it into the right place for their shell configuration.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let shell: Shell = args.shell.into();
    generate(shell, &mut cmd, "gitlab-branch-report", &mut io::stdout());
    Ok(())
}
