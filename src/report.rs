//! # Report Assembly
//!
//! The output unit of the pipeline ([`BranchRecord`]), the deterministic
//! ordering step, and the end-to-end `generate` entry point that strings
//! resolution, discovery, and enrichment together.
//!
//! Records are sorted ascending by the parsed commit instant, oldest first:
//! staleness triage is the primary analytical value of the report. The sort
//! is stable, so records with equal instants keep the order upstream
//! enumeration produced. Sorting always happens on the parsed instant, never
//! on a rendered date string; lexical order of formatted dates is only
//! trustworthy when every component is fixed-width in a single timezone,
//! which commit dates are not.

use chrono::{DateTime, FixedOffset};
use log::info;

use crate::api::GitLabApi;
use crate::discover;
use crate::enrich;
use crate::error::Result;
use crate::models::MergeRequestState;
use crate::resolve::{self, Scope};

/// Reference to the merge request associated with a branch.
#[derive(Debug, Clone)]
pub struct MergeRequestRef {
    /// Project-scoped sequence number (rendered as `!N`).
    pub iid: u64,
    /// URL of the merge request's web page.
    pub web_url: String,
}

/// The normalized, enriched output unit for one branch.
///
/// Constructed once by enrichment and never mutated afterwards; assembly
/// only reorders. `merged_into` is populated if and only if `mr_state` is
/// [`MergeRequestState::Merged`].
#[derive(Debug, Clone)]
pub struct BranchRecord {
    /// Full namespaced project path.
    pub project_path: String,
    /// Project web URL.
    pub project_url: String,
    /// Whether the owning project is archived.
    pub archived: bool,
    /// Branch name.
    pub branch: String,
    /// Branch tree web URL.
    pub branch_url: String,
    /// Display name of the last committer.
    pub committer: String,
    /// Instant of the last commit; the report sort key.
    pub committed_at: DateTime<FixedOffset>,
    /// Whether the branch is protected.
    pub protected: bool,
    /// Target branch of the associated merge request, when that request is
    /// merged.
    pub merged_into: Option<String>,
    /// The most recent merge request with this branch as source, if any.
    pub merge_request: Option<MergeRequestRef>,
    /// Lifecycle state of that merge request.
    pub mr_state: Option<MergeRequestState>,
}

/// Order records ascending by commit instant, oldest first.
///
/// `sort_by_key` is a stable sort, so equal instants retain their relative
/// input order. No deduplication happens here: discovery already guarantees
/// each project appears once, and enrichment visits each branch list once,
/// so records are unique per (project path, branch name).
pub fn assemble(mut records: Vec<BranchRecord>) -> Vec<BranchRecord> {
    records.sort_by_key(|record| record.committed_at);
    records
}

/// Run the whole pipeline for an input path.
///
/// Resolves the path (project first, then group), discovers the project set,
/// enriches every project's branches, and returns the assembled, ordered
/// record list.
pub fn generate(api: &dyn GitLabApi, path: &str) -> Result<Vec<BranchRecord>> {
    let projects = match resolve::resolve_path(api, path)? {
        Scope::Project(project) => vec![project],
        Scope::Group(group) => discover::discover(api, &group)?,
    };
    info!("Found {} projects in total", projects.len());

    let mut records = Vec::new();
    for project in &projects {
        info!("Processing project: {}", project.path_with_namespace);
        records.extend(enrich::enrich(api, project)?);
    }

    Ok(assemble(records))
}
