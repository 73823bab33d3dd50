//! # Branch Enrichment
//!
//! For one project, enumerate every branch and correlate each with its
//! protection flag, latest commit, and most relevant merge request to
//! produce normalized [`BranchRecord`]s.
//!
//! ## Error policy
//!
//! A failure to list the branch collection itself is fatal: it indicates a
//! systemic problem with the project, not a per-item anomaly. A failure to
//! fetch one branch's details or merge requests is not: that branch is
//! skipped with a warning naming the project and branch, and the remaining
//! branches are still processed. One bad branch must not void an entire
//! project's report. This asymmetry with the fail-fast discovery step is
//! deliberate.

use log::{info, warn};

use crate::api::GitLabApi;
use crate::error::{Error, Result};
use crate::models::{MergeRequestState, Project};
use crate::report::{BranchRecord, MergeRequestRef};

/// Enumerate and enrich all branches of `project`.
///
/// Branches whose detail fetches fail contribute no record; the branch
/// listing failing at all aborts with [`Error::Listing`].
pub fn enrich(api: &dyn GitLabApi, project: &Project) -> Result<Vec<BranchRecord>> {
    let branches = api
        .list_branches(project)
        .map_err(|e| Error::Listing {
            path: project.path_with_namespace.clone(),
            message: e.to_string(),
        })?;

    let mut records = Vec::with_capacity(branches.len());
    for branch in &branches {
        info!("Processing branch: {}", branch.name);
        match branch_record(api, project, &branch.name) {
            Ok(record) => records.push(record),
            Err(e) if e.is_recoverable() => warn!("Skipping branch: {}", e),
            Err(e) => return Err(e),
        }
    }
    Ok(records)
}

/// Wrap a per-branch fetch failure with the project and branch it affects.
fn detail_failure(project: &Project, branch: &str, error: Error) -> Error {
    Error::Detail {
        project: project.path_with_namespace.clone(),
        branch: branch.to_string(),
        message: error.to_string(),
    }
}

/// Build the record for a single branch.
///
/// Fetches the branch individually rather than reusing the listing entry so
/// the protection flag and commit reflect the branch endpoint's full record.
fn branch_record(api: &dyn GitLabApi, project: &Project, name: &str) -> Result<BranchRecord> {
    let branch = api
        .get_branch(project, name)
        .map_err(|e| detail_failure(project, name, e))?;

    // The listing is newest-first (see GitLabApi::list_merge_requests), so
    // the first element is the branch's most recent merge request.
    let merge_requests = api
        .list_merge_requests(project, name)
        .map_err(|e| detail_failure(project, name, e))?;
    let latest_mr = merge_requests.into_iter().next();

    let merged_into = latest_mr
        .as_ref()
        .filter(|mr| mr.state == MergeRequestState::Merged)
        .map(|mr| mr.target_branch.clone());
    let mr_state = latest_mr.as_ref().map(|mr| mr.state);
    let merge_request = latest_mr.map(|mr| MergeRequestRef {
        iid: mr.iid,
        web_url: mr.web_url,
    });

    Ok(BranchRecord {
        project_path: project.path_with_namespace.clone(),
        project_url: project.web_url.clone(),
        archived: project.archived,
        branch: branch.name.clone(),
        branch_url: format!("{}/tree/{}", project.web_url, branch.name),
        committer: branch.commit.committer_name,
        committed_at: branch.commit.committed_date,
        protected: branch.protected,
        merged_into,
        merge_request,
        mr_state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{branch, merge_request, project, InMemoryGitLab};

    #[test]
    fn test_enrich_builds_full_record() {
        let api = InMemoryGitLab::new().with_branches(
            1,
            vec![branch("main", true, "2023-01-01T00:00:00Z", "Alice")],
        );

        let records = enrich(&api, &project(1, "acme/svc-x")).unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.project_path, "acme/svc-x");
        assert_eq!(record.branch, "main");
        assert_eq!(
            record.branch_url,
            "https://gitlab.example.com/acme/svc-x/tree/main"
        );
        assert_eq!(record.committer, "Alice");
        assert!(record.protected);
        assert!(!record.archived);
    }

    #[test]
    fn test_branch_without_merge_requests_has_empty_mr_fields() {
        let api = InMemoryGitLab::new().with_branches(
            1,
            vec![branch("stale", false, "2021-03-15T08:00:00Z", "Bob")],
        );

        let records = enrich(&api, &project(1, "acme/svc-x")).unwrap();
        let record = &records[0];
        assert!(record.merge_request.is_none());
        assert!(record.mr_state.is_none());
        assert!(record.merged_into.is_none());
        // Commit fields stay valid regardless.
        assert_eq!(record.committer, "Bob");
        assert!(!record.protected);
    }

    #[test]
    fn test_merged_mr_populates_merged_into() {
        let api = InMemoryGitLab::new()
            .with_branches(
                1,
                vec![branch("feature-1", false, "2023-06-01T00:00:00Z", "Alice")],
            )
            .with_merge_requests(
                1,
                "feature-1",
                vec![merge_request(7, "feature-1", "main", MergeRequestState::Merged)],
            );

        let records = enrich(&api, &project(1, "acme/svc-x")).unwrap();
        let record = &records[0];
        assert_eq!(record.merged_into.as_deref(), Some("main"));
        assert_eq!(record.mr_state, Some(MergeRequestState::Merged));
        assert_eq!(record.merge_request.as_ref().unwrap().iid, 7);
    }

    #[test]
    fn test_open_mr_leaves_merged_into_empty() {
        let api = InMemoryGitLab::new()
            .with_branches(
                1,
                vec![branch("feature-2", false, "2023-06-02T00:00:00Z", "Alice")],
            )
            .with_merge_requests(
                1,
                "feature-2",
                vec![merge_request(8, "feature-2", "main", MergeRequestState::Opened)],
            );

        let records = enrich(&api, &project(1, "acme/svc-x")).unwrap();
        let record = &records[0];
        assert!(record.merged_into.is_none());
        assert_eq!(record.mr_state, Some(MergeRequestState::Opened));
        assert!(record.merge_request.is_some());
    }

    #[test]
    fn test_first_listed_mr_wins() {
        // Newest-first listing: the first element is selected even when an
        // older merged MR follows it.
        let api = InMemoryGitLab::new()
            .with_branches(
                1,
                vec![branch("feature-3", false, "2023-06-03T00:00:00Z", "Alice")],
            )
            .with_merge_requests(
                1,
                "feature-3",
                vec![
                    merge_request(20, "feature-3", "develop", MergeRequestState::Opened),
                    merge_request(9, "feature-3", "main", MergeRequestState::Merged),
                ],
            );

        let records = enrich(&api, &project(1, "acme/svc-x")).unwrap();
        let record = &records[0];
        assert_eq!(record.merge_request.as_ref().unwrap().iid, 20);
        assert_eq!(record.mr_state, Some(MergeRequestState::Opened));
        assert!(record.merged_into.is_none());
    }

    #[test]
    fn test_detail_failure_skips_branch_and_continues() {
        testing_logger::setup();

        let api = InMemoryGitLab::new()
            .with_branches(
                1,
                vec![
                    branch("good-1", false, "2023-01-01T00:00:00Z", "Alice"),
                    branch("broken", false, "2023-02-01T00:00:00Z", "Bob"),
                    branch("good-2", false, "2023-03-01T00:00:00Z", "Carol"),
                ],
            )
            .fail_branch_detail_for(1, "broken");

        let records = enrich(&api, &project(1, "acme/svc-x")).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.branch.as_str()).collect();
        assert_eq!(names, vec!["good-1", "good-2"]);

        testing_logger::validate(|captured| {
            let skipped: Vec<_> = captured
                .iter()
                .filter(|entry| entry.level == log::Level::Warn)
                .collect();
            assert_eq!(skipped.len(), 1);
            assert!(skipped[0].body.contains("broken"));
            assert!(skipped[0].body.contains("acme/svc-x"));
        });
    }

    #[test]
    fn test_mr_listing_failure_skips_branch() {
        let api = InMemoryGitLab::new()
            .with_branches(
                1,
                vec![
                    branch("feature-1", false, "2023-01-01T00:00:00Z", "Alice"),
                    branch("feature-2", false, "2023-02-01T00:00:00Z", "Bob"),
                ],
            )
            .fail_mr_listing_for(1, "feature-1");

        let records = enrich(&api, &project(1, "acme/svc-x")).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].branch, "feature-2");
    }

    #[test]
    fn test_branch_listing_failure_is_fatal() {
        let api = InMemoryGitLab::new().fail_branch_listing_for(1);

        let error = enrich(&api, &project(1, "acme/svc-x")).unwrap_err();
        assert!(matches!(error, Error::Listing { ref path, .. } if path == "acme/svc-x"));
    }

    #[test]
    fn test_project_with_no_branches_yields_no_records() {
        let api = InMemoryGitLab::new().with_branches(1, vec![]);

        let records = enrich(&api, &project(1, "acme/svc-x")).unwrap();
        assert!(records.is_empty());
    }
}
