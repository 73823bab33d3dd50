//! # GitLab API Data Model
//!
//! Deserialization shapes for the GitLab REST API v4 payloads the pipeline
//! consumes. Field names mirror the API exactly so the structs can be fed
//! straight to `serde_json`.
//!
//! All of these are read-only, single-pass snapshots fetched fresh per run;
//! none are persisted or mutated by the core.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// A single source-control repository entity.
///
/// See <https://docs.gitlab.com/api/projects/#get-a-single-project>.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    /// Project id, the identity used for deduplication across group paths.
    pub id: u64,
    /// Full namespaced path, e.g. `acme/team-a/svc-x`.
    pub path_with_namespace: String,
    /// Display name.
    pub name: String,
    /// URL of the project's web page.
    pub web_url: String,
    /// Whether the project is archived.
    #[serde(default)]
    pub archived: bool,
}

/// A namespace that owns projects and nested subgroups.
#[derive(Debug, Clone, Deserialize)]
pub struct Group {
    /// Group id.
    pub id: u64,
    /// Full namespaced path, e.g. `acme/team-a`.
    pub full_path: String,
}

/// A partial group record as returned by subgroup listings.
///
/// Listings omit fields a full group fetch carries, so discovery resolves
/// each `GroupRef` to a full [`Group`] by id before recursing.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupRef {
    /// Group id, used for the full fetch.
    pub id: u64,
    /// Full namespaced path (for error context).
    pub full_path: String,
}

/// A named branch within a project, with its latest commit.
#[derive(Debug, Clone, Deserialize)]
pub struct Branch {
    /// Branch name, unique within a project.
    pub name: String,
    /// Whether the branch is protected.
    #[serde(default)]
    pub protected: bool,
    /// The branch's latest commit.
    pub commit: Commit,
}

/// Commit metadata attached to a branch head.
#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    /// Committer display name.
    pub committer_name: String,
    /// Commit timestamp, parsed to a timezone-aware instant.
    ///
    /// Ordering decisions are always made on this instant, never on a
    /// rendered date string.
    pub committed_date: DateTime<FixedOffset>,
}

/// Lifecycle state of a merge request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeRequestState {
    /// Open and awaiting review or merge.
    Opened,
    /// Closed without merging.
    Closed,
    /// Merged into the target branch.
    Merged,
    /// Discussion locked by an administrator; behaves like any other
    /// non-merged state for reporting purposes.
    Locked,
}

impl MergeRequestState {
    /// Lowercase API spelling, used for display and CSS class names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Opened => "opened",
            Self::Closed => "closed",
            Self::Merged => "merged",
            Self::Locked => "locked",
        }
    }
}

/// A proposal to merge one branch into another.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeRequest {
    /// Project-scoped sequence number (the `!N` reference).
    pub iid: u64,
    /// Name of the branch the request merges from.
    pub source_branch: String,
    /// Name of the branch the request merges into.
    pub target_branch: String,
    /// Lifecycle state.
    pub state: MergeRequestState,
    /// URL of the merge request's web page.
    pub web_url: String,
}
