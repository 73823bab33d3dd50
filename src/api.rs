//! # Remote Query Capability
//!
//! This module defines [`GitLabApi`], the abstract interface through which
//! the pipeline talks to a GitLab instance. The core components (path
//! resolution, project discovery, branch enrichment) depend only on this
//! trait, never on a concrete transport.
//!
//! ## Design
//!
//! Separating the query interface from its REST implementation
//! ([`crate::client::RestClient`]) keeps the pipeline logic free of HTTP
//! concerns and lets tests substitute an in-memory implementation to
//! simulate group trees, branch sets, and failure modes without a network.
//!
//! All listing operations return the *complete* collection: implementations
//! must follow pagination to exhaustion, never a single page.

use crate::error::Result;
use crate::models::{Branch, Group, GroupRef, MergeRequest, Project};

/// Abstract query interface against a GitLab instance.
///
/// Implementations perform read-only lookups; the pipeline never writes to
/// the remote system.
pub trait GitLabApi: Send + Sync {
    /// Fetch a single project by its full namespaced path.
    ///
    /// Returns [`crate::error::Error::NotFound`] when no project exists at
    /// that path.
    fn get_project(&self, path: &str) -> Result<Project>;

    /// Fetch a single group by its full namespaced path.
    ///
    /// Returns [`crate::error::Error::NotFound`] when no group exists at
    /// that path.
    fn get_group(&self, path: &str) -> Result<Group>;

    /// Fetch a full group record by id.
    ///
    /// Subgroup listings return partial records; discovery resolves each one
    /// through this call before recursing into it.
    fn get_group_by_id(&self, id: u64) -> Result<Group>;

    /// List every project visible directly under a group, including projects
    /// shared into it from elsewhere.
    fn list_group_projects(&self, group: &Group) -> Result<Vec<Project>>;

    /// List the projects shared into a group (visible under it but owned by
    /// another namespace). Discovery excludes these from the owned set.
    fn list_group_shared_projects(&self, group: &Group) -> Result<Vec<Project>>;

    /// List a group's direct subgroups.
    fn list_subgroups(&self, group: &Group) -> Result<Vec<GroupRef>>;

    /// List every branch of a project.
    fn list_branches(&self, project: &Project) -> Result<Vec<Branch>>;

    /// Fetch one branch with its protection flag and latest commit.
    fn get_branch(&self, project: &Project, name: &str) -> Result<Branch>;

    /// List all merge requests whose source branch is `source_branch`,
    /// across every lifecycle state.
    ///
    /// Ordering contract: results come back newest-first, per GitLab's
    /// default `order_by=created_at`, `sort=desc` listing order. Callers
    /// take the first element as the branch's most recent merge request;
    /// this relies on the remote default rather than an explicit timestamp
    /// comparison because the trimmed data model carries no MR creation
    /// time. Implementations must preserve that ordering.
    fn list_merge_requests(&self, project: &Project, source_branch: &str)
        -> Result<Vec<MergeRequest>>;
}
