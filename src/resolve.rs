//! Input path resolution.
//!
//! An input path like `mygroup` or `mygroup/myproject` is ambiguous: it may
//! name a single project or a group whose whole project tree should be
//! walked. Resolution tries the project interpretation first and falls back
//! to the group interpretation only on a definite NotFound; a path that is
//! valid as both is treated as a project.

use log::debug;

use crate::api::GitLabApi;
use crate::error::{Error, Result};
use crate::models::{Group, Project};

/// What an input path resolved to.
#[derive(Debug, Clone)]
pub enum Scope {
    /// The path names a single project.
    Project(Project),
    /// The path names a group; discovery must walk its subgroup tree.
    Group(Group),
}

/// Resolve an input path to a project or a group, in that order.
///
/// Transport failures from the project lookup propagate unchanged: only a
/// definite NotFound triggers the group fallback, so an outage is never
/// misreported as a missing path.
pub fn resolve_path(api: &dyn GitLabApi, path: &str) -> Result<Scope> {
    match api.get_project(path) {
        Ok(project) => {
            debug!("Resolved {} as project", path);
            Ok(Scope::Project(project))
        }
        Err(Error::NotFound { .. }) => match api.get_group(path) {
            Ok(group) => {
                debug!("Resolved {} as group", path);
                Ok(Scope::Group(group))
            }
            Err(Error::NotFound { .. }) => Err(Error::NotFound {
                path: path.to_string(),
            }),
            Err(other) => Err(other),
        },
        Err(other) => Err(other),
    }
}
