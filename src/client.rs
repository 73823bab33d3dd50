//! # REST Client
//!
//! The concrete [`GitLabApi`] implementation against the GitLab REST API v4,
//! built on `reqwest`'s blocking client. Every remote call is a synchronous
//! request/response round trip; the pipeline performs no overlapping I/O.
//!
//! ## Pagination
//!
//! GitLab caps list responses at 100 items per page. Every listing method
//! here walks `page=1, 2, ...` with `per_page=100` until a short page comes
//! back, so callers always see the complete collection.
//!
//! ## Merge request ordering
//!
//! [`GitLabApi::list_merge_requests`] promises newest-first results. Rather
//! than trusting the server default, the request pins
//! `order_by=created_at&sort=desc` explicitly, so a future change to the
//! default listing order cannot silently turn "most recent" into
//! "arbitrary".

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::GitLabApi;
use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::models::{Branch, Group, GroupRef, MergeRequest, Project};

const PER_PAGE: usize = 100;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking REST implementation of [`GitLabApi`].
pub struct RestClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl RestClient {
    /// Build a client from validated connection settings.
    pub fn new(connection: Connection) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Connection {
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            http,
            base_url: connection.base_url,
            token: connection.token,
        })
    }

    /// Build an API v4 endpoint URL from path segments.
    ///
    /// Segments are percent-encoded individually, so a namespaced path like
    /// `acme/svc-x` becomes the single segment `acme%2Fsvc-x` the API
    /// expects for path-addressed lookups.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        {
            // Connection::new rejects cannot-be-a-base URLs.
            let mut parts = url
                .path_segments_mut()
                .expect("base URL validated at connection setup");
            parts.pop_if_empty();
            parts.extend(["api", "v4"]);
            parts.extend(segments);
        }
        url
    }

    /// Perform one GET request and decode the JSON body.
    fn get<T: DeserializeOwned>(&self, url: Url, query: &[(&str, String)]) -> Result<T> {
        let mut request = self
            .http
            .get(url.clone())
            .header("PRIVATE-TOKEN", &self.token);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().map_err(|e| Error::Http {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        match response.status() {
            status if status.is_success() => {
                response.json::<T>().map_err(|e| Error::Decode {
                    url: url.to_string(),
                    message: e.to_string(),
                })
            }
            StatusCode::NOT_FOUND => Err(Error::NotFound {
                path: url.path().to_string(),
            }),
            status => Err(Error::Http {
                url: url.to_string(),
                message: format!("unexpected status {}", status),
            }),
        }
    }

    /// Fetch a complete listing, following pagination to exhaustion.
    fn get_all<T: DeserializeOwned>(&self, url: Url, query: &[(&str, String)]) -> Result<Vec<T>> {
        let mut collected = Vec::new();
        let mut page: u32 = 1;
        loop {
            let mut paged_query: Vec<(&str, String)> = query.to_vec();
            paged_query.push(("per_page", PER_PAGE.to_string()));
            paged_query.push(("page", page.to_string()));

            let batch: Vec<T> = self.get(url.clone(), &paged_query)?;
            let batch_len = batch.len();
            collected.extend(batch);

            if batch_len < PER_PAGE {
                return Ok(collected);
            }
            page += 1;
        }
    }

    /// Rewrites a transport-level `NotFound` to carry the caller's path
    /// instead of the percent-encoded URL path.
    fn named_not_found(error: Error, path: &str) -> Error {
        match error {
            Error::NotFound { .. } => Error::NotFound {
                path: path.to_string(),
            },
            other => other,
        }
    }
}

impl GitLabApi for RestClient {
    fn get_project(&self, path: &str) -> Result<Project> {
        let url = self.endpoint(&["projects", path]);
        self.get(url, &[])
            .map_err(|e| Self::named_not_found(e, path))
    }

    fn get_group(&self, path: &str) -> Result<Group> {
        let url = self.endpoint(&["groups", path]);
        self.get(url, &[])
            .map_err(|e| Self::named_not_found(e, path))
    }

    fn get_group_by_id(&self, id: u64) -> Result<Group> {
        let url = self.endpoint(&["groups", &id.to_string()]);
        self.get(url, &[])
    }

    fn list_group_projects(&self, group: &Group) -> Result<Vec<Project>> {
        let url = self.endpoint(&["groups", &group.id.to_string(), "projects"]);
        self.get_all(url, &[])
    }

    fn list_group_shared_projects(&self, group: &Group) -> Result<Vec<Project>> {
        let url = self.endpoint(&["groups", &group.id.to_string(), "projects", "shared"]);
        self.get_all(url, &[])
    }

    fn list_subgroups(&self, group: &Group) -> Result<Vec<GroupRef>> {
        let url = self.endpoint(&["groups", &group.id.to_string(), "subgroups"]);
        self.get_all(url, &[])
    }

    fn list_branches(&self, project: &Project) -> Result<Vec<Branch>> {
        let url = self.endpoint(&[
            "projects",
            &project.id.to_string(),
            "repository",
            "branches",
        ]);
        self.get_all(url, &[])
    }

    fn get_branch(&self, project: &Project, name: &str) -> Result<Branch> {
        let url = self.endpoint(&[
            "projects",
            &project.id.to_string(),
            "repository",
            "branches",
            name,
        ]);
        self.get(url, &[])
    }

    fn list_merge_requests(
        &self,
        project: &Project,
        source_branch: &str,
    ) -> Result<Vec<MergeRequest>> {
        let url = self.endpoint(&["projects", &project.id.to_string(), "merge_requests"]);
        let query = [
            ("source_branch", source_branch.to_string()),
            ("state", "all".to_string()),
            ("order_by", "created_at".to_string()),
            ("sort", "desc".to_string()),
        ];
        self.get_all(url, &query)
    }
}
