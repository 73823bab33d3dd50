//! # CLI Command Implementations
//!
//! Each subcommand of the `gitlab-branch-report` tool lives in its own file:
//! an `Args` struct derived with `clap` plus an `execute` function that takes
//! the parsed arguments and orchestrates the library calls.

pub mod completions;
pub mod report;
