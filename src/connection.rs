//! Connection settings for the GitLab instance.
//!
//! The token is always read from the `GITLAB_TOKEN` environment variable;
//! it is deliberately not a CLI flag so it never shows up in shell history
//! or process listings. The instance URL defaults to gitlab.com and can be
//! overridden with `--gitlab-url` or the `GITLAB_URL` environment variable.

use url::Url;

use crate::error::{Error, Result};

/// The instance used when no URL override is given.
pub const DEFAULT_GITLAB_URL: &str = "https://gitlab.com";

/// Validated settings for talking to one GitLab instance.
#[derive(Debug, Clone)]
pub struct Connection {
    /// Instance base URL (scheme + host, no API prefix).
    pub base_url: Url,
    /// Personal access token sent as `PRIVATE-TOKEN`.
    pub token: String,
}

impl Connection {
    /// Create a connection from an explicit URL and token.
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let url = Url::parse(base_url).map_err(|e| Error::Connection {
            message: format!("invalid GitLab URL {}: {}", base_url, e),
        })?;
        // Rejecting cannot-be-a-base URLs here lets the client append API
        // path segments without a fallible check on every request.
        if url.cannot_be_a_base() {
            return Err(Error::Connection {
                message: format!("invalid GitLab URL {}: not an http(s) base URL", base_url),
            });
        }
        if token.is_empty() {
            return Err(Error::Connection {
                message: "empty access token".to_string(),
            });
        }
        Ok(Self {
            base_url: url,
            token: token.to_string(),
        })
    }

    /// Create a connection reading the token from `GITLAB_TOKEN`.
    pub fn from_env(base_url: &str) -> Result<Self> {
        let token = std::env::var("GITLAB_TOKEN").map_err(|_| Error::Connection {
            message: "GITLAB_TOKEN environment variable not set. \
                      Create a personal access token with read_api scope and \
                      export it as GITLAB_TOKEN."
                .to_string(),
        })?;
        Self::new(base_url, &token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_https_url() {
        let conn = Connection::new("https://gitlab.example.com", "glpat-abc").unwrap();
        assert_eq!(conn.base_url.host_str(), Some("gitlab.example.com"));
        assert_eq!(conn.token, "glpat-abc");
    }

    #[test]
    fn test_new_rejects_unparseable_url() {
        let result = Connection::new("not a url", "glpat-abc");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("invalid GitLab URL"));
    }

    #[test]
    fn test_new_rejects_cannot_be_a_base_url() {
        let result = Connection::new("data:text/plain,hello", "glpat-abc");
        assert!(result.is_err());
    }

    #[test]
    fn test_new_rejects_empty_token() {
        let result = Connection::new("https://gitlab.com", "");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty access token"));
    }
}
