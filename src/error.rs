//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `gitlab-branch-report` application. It uses the `thiserror` library to
//! create a comprehensive `Error` enum that covers all anticipated failure
//! modes, providing clear and descriptive error messages.
//!
//! ## Error Taxonomy
//!
//! The pipeline distinguishes three classes of remote failure:
//!
//! - **`NotFound`**: an input path resolves to neither a project nor a group.
//!   Fatal; surfaced to the caller with the offending path.
//! - **`Listing`**: a bulk-listing call failed (group projects, shared
//!   projects, subgroups, or a project's branch collection). Fatal to the
//!   whole run, carrying the path of the entity whose listing failed.
//! - **`Detail`**: a per-branch detail or merge-request lookup failed.
//!   Recovered locally: the affected branch is skipped with a warning and
//!   processing continues.
//!
//! The remaining variants wrap collaborator failures (HTTP transport, JSON
//! decoding, connection setup, report file I/O).
//!
//! The `Result` type alias is used to return `Result<T, Error>` from
//! functions, making it easy to handle errors and propagate them up the
//! call stack.

use thiserror::Error;

/// Main error type for gitlab-branch-report operations
#[derive(Error, Debug)]
pub enum Error {
    /// The input path resolved to neither a project nor a group.
    #[error("Path not found: {path} is neither a project nor a group")]
    NotFound { path: String },

    /// A bulk-listing call against the remote system failed.
    ///
    /// Includes the full path of the group or project whose listing failed.
    /// Listing failures indicate a systemic problem and abort the run.
    #[error("Listing failed for {path}: {message}")]
    Listing { path: String, message: String },

    /// A per-branch detail or merge-request lookup failed.
    ///
    /// Recoverable: the branch is skipped and the failure is logged with
    /// the project path and branch name for auditability.
    #[error("Branch detail fetch failed for {project}@{branch}: {message}")]
    Detail {
        project: String,
        branch: String,
        message: String,
    },

    /// Connection setup failed (missing token, malformed instance URL).
    #[error("Connection error: {message}")]
    Connection { message: String },

    /// An HTTP request failed at the transport level or returned an
    /// unexpected status.
    #[error("HTTP error for {url}: {message}")]
    Http { url: String, message: String },

    /// A response body could not be decoded into the expected shape.
    #[error("Decode error for {url}: {message}")]
    Decode { url: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for failures the enrichment step recovers from by skipping the
    /// affected branch. Everything else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Detail { .. })
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
