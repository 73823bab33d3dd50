//! # GitLab Branch Report Library
//!
//! Core functionality for building a branch inventory report across GitLab
//! projects and groups. It is designed to be used by the
//! `gitlab-branch-report` command-line tool but can also be embedded in
//! other applications that need a normalized view of branch state.
//!
//! ## Core Concepts
//!
//! The library is built around a small pipeline:
//!
//! - **Resolution (`resolve`)**: Interprets the input path as a project
//!   first, falling back to a group only on a definite not-found.
//! - **Discovery (`discover`)**: Recursively enumerates every project owned
//!   by a group and its subgroup tree, excluding shared projects and
//!   deduplicating by project identity.
//! - **Enrichment (`enrich`)**: Correlates each branch with its protection
//!   flag, latest commit, and most recent merge request.
//! - **Assembly and Rendering (`report`, `render`)**: Orders records by
//!   commit instant, oldest first, and renders them into a standalone HTML
//!   file.
//!
//! All remote access goes through the [`api::GitLabApi`] trait; the
//! production implementation ([`client::RestClient`]) speaks the GitLab REST
//! API v4, and tests substitute in-memory fakes.
//!
//! ## Error Policy
//!
//! Resolution and discovery fail fast: a listing failure voids the run,
//! because a silently incomplete inventory is worse than no inventory.
//! Per-branch enrichment fails soft: a branch whose details cannot be
//! fetched is skipped with a warning and the rest of the report proceeds.

pub mod api;
pub mod client;
pub mod connection;
pub mod discover;
pub mod enrich;
pub mod error;
pub mod models;
pub mod output;
pub mod render;
pub mod report;
pub mod resolve;
