use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{check, Schema, Violation};

/// A connected code repository the agent can act on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// Full resource name, e.g. `sources/github/owner/repo`.
    pub name: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_repo: Option<GithubRepo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubRepo {
    pub owner: String,
    pub repo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSourcesResponse {
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl Schema for Source {
    const NAME: &'static str = "Source";

    fn check(value: &Value, path: &str, violations: &mut Vec<Violation>) {
        if !check::expect_object(value, path, violations) {
            return;
        }
        check::require_str(value, path, "name", violations);
        check::require_str(value, path, "id", violations);
        if let Some(repo) = check::optional_object(value, path, "githubRepo", violations) {
            GithubRepo::check(repo, &check::join(path, "githubRepo"), violations);
        }
    }
}

impl Schema for GithubRepo {
    const NAME: &'static str = "GithubRepo";

    fn check(value: &Value, path: &str, violations: &mut Vec<Violation>) {
        check::require_str(value, path, "owner", violations);
        check::require_str(value, path, "repo", violations);
    }
}

impl Schema for ListSourcesResponse {
    const NAME: &'static str = "ListSourcesResponse";

    fn check(value: &Value, path: &str, violations: &mut Vec<Violation>) {
        if !check::expect_object(value, path, violations) {
            return;
        }
        if let Some(items) = check::optional_array(value, path, "sources", violations) {
            for (i, item) in items.iter().enumerate() {
                Source::check(item, &check::index(path, "sources", i), violations);
            }
        }
        check::optional_str(value, path, "nextPageToken", violations);
    }
}
