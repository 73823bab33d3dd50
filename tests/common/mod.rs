//! Shared test utilities for E2E tests.
//!
//! Add `mod common;` to your test file, then `use common::prelude::*;`.

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::report_cmd;
}

/// Build a `report` invocation with a hermetic environment: the token and
/// URL variables from the developer's shell never leak into the test.
pub fn report_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("gitlab-branch-report");
    cmd.env_remove("GITLAB_TOKEN").env_remove("GITLAB_URL");
    cmd.arg("report");
    cmd
}
