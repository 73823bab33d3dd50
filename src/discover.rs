//! # Project Discovery
//!
//! Recursive enumeration of every project owned by a group and its subgroup
//! tree. Two properties make this more than a plain tree walk:
//!
//! - **Shared-project exclusion**: a project can be *shared* into a group it
//!   is not owned by. Reporting it there would duplicate it under its owning
//!   group, so a direct project that also appears in the same group's
//!   shared-projects list is skipped, with a warning so the omission is
//!   auditable.
//! - **Identity-keyed deduplication**: the same project can be reachable
//!   through more than one group path. The accumulated set is keyed by
//!   project id, so repeated reachability collapses to a single entry while
//!   first-seen order is preserved. A visited set over group ids additionally
//!   guards the walk against a subgroup cycle, should the remote ever
//!   produce one.
//!
//! Any listing failure here is fatal to the whole run and is reported with
//! the failing group's full path. This is the deliberate fail-fast half of
//! the pipeline's error policy; per-branch enrichment (see
//! [`crate::enrich`]) is the fail-soft half.

use std::collections::HashSet;

use log::{info, warn};

use crate::api::GitLabApi;
use crate::error::{Error, Result};
use crate::models::{Group, Project};

/// Recursively discover all distinct projects owned by `group` and its
/// subgroup tree.
pub fn discover(api: &dyn GitLabApi, group: &Group) -> Result<Vec<Project>> {
    let mut visited_groups = HashSet::new();
    let mut seen_projects = HashSet::new();
    let mut discovered = Vec::new();
    walk_group(
        api,
        group,
        &mut visited_groups,
        &mut seen_projects,
        &mut discovered,
    )?;
    Ok(discovered)
}

fn walk_group(
    api: &dyn GitLabApi,
    group: &Group,
    visited_groups: &mut HashSet<u64>,
    seen_projects: &mut HashSet<u64>,
    discovered: &mut Vec<Project>,
) -> Result<()> {
    if !visited_groups.insert(group.id) {
        // Already walked through another path; the remote should never
        // produce a cycle, but a repeat visit must not recurse forever.
        return Ok(());
    }

    info!("Getting projects from group: {}", group.full_path);

    let direct = api
        .list_group_projects(group)
        .map_err(|e| listing_failure(&group.full_path, e))?;
    let shared = api
        .list_group_shared_projects(group)
        .map_err(|e| listing_failure(&group.full_path, e))?;
    let shared_ids: HashSet<u64> = shared.iter().map(|p| p.id).collect();

    for project in direct {
        if shared_ids.contains(&project.id) {
            warn!(
                "Skipping {}: shared into group {}, not owned by it",
                project.path_with_namespace, group.full_path
            );
            continue;
        }
        if seen_projects.insert(project.id) {
            discovered.push(project);
        }
    }

    let subgroups = api
        .list_subgroups(group)
        .map_err(|e| listing_failure(&group.full_path, e))?;
    for subgroup_ref in subgroups {
        // Subgroup listings return partial records; fetch the full group
        // before recursing.
        let subgroup = api
            .get_group_by_id(subgroup_ref.id)
            .map_err(|e| listing_failure(&subgroup_ref.full_path, e))?;
        walk_group(api, &subgroup, visited_groups, seen_projects, discovered)?;
    }

    Ok(())
}

fn listing_failure(path: &str, error: Error) -> Error {
    Error::Listing {
        path: path.to_string(),
        message: error.to_string(),
    }
}
