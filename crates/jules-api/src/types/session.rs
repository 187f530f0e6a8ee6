use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{check, Schema, Violation};

/// A unit of agent work created from a prompt and a source context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Full resource name, e.g. `sessions/31415926`.
    pub name: String,
    pub id: String,
    pub prompt: String,
    pub source_context: SourceContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_plan_approval: Option<bool>,
    pub state: SessionState,
    /// Link to the session in the Jules web UI.
    pub url: String,
    pub create_time: String,
    pub update_time: String,
}

/// Lifecycle state of a session.
///
/// New states may appear upstream before this list catches up, so unknown
/// values deserialize to [`SessionState::Unknown`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    StateUnspecified,
    Queued,
    Planning,
    AwaitingPlanApproval,
    InProgress,
    Paused,
    Failed,
    Completed,
    #[serde(other)]
    Unknown,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StateUnspecified => "STATE_UNSPECIFIED",
            Self::Queued => "QUEUED",
            Self::Planning => "PLANNING",
            Self::AwaitingPlanApproval => "AWAITING_PLAN_APPROVAL",
            Self::InProgress => "IN_PROGRESS",
            Self::Paused => "PAUSED",
            Self::Failed => "FAILED",
            Self::Completed => "COMPLETED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The source a session operates on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceContext {
    /// Resource name of a source, e.g. `sources/github/owner/repo`.
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_repo_context: Option<GithubRepoContext>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubRepoContext {
    pub starting_branch: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub prompt: String,
    pub source_context: SourceContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_plan_approval: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSessionsResponse {
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl Schema for Session {
    const NAME: &'static str = "Session";

    fn check(value: &Value, path: &str, violations: &mut Vec<Violation>) {
        if !check::expect_object(value, path, violations) {
            return;
        }
        check::require_str(value, path, "name", violations);
        check::require_str(value, path, "id", violations);
        check::require_str(value, path, "prompt", violations);
        if let Some(ctx) = check::require_object(value, path, "sourceContext", violations) {
            SourceContext::check(ctx, &check::join(path, "sourceContext"), violations);
        }
        check::optional_str(value, path, "title", violations);
        check::optional_bool(value, path, "requirePlanApproval", violations);
        check::require_str(value, path, "state", violations);
        check::require_str(value, path, "url", violations);
        check::require_str(value, path, "createTime", violations);
        check::require_str(value, path, "updateTime", violations);
    }
}

impl Schema for SourceContext {
    const NAME: &'static str = "SourceContext";

    fn check(value: &Value, path: &str, violations: &mut Vec<Violation>) {
        check::require_nonempty_str(value, path, "source", violations);
        if let Some(ctx) = check::optional_object(value, path, "githubRepoContext", violations) {
            check::require_str(
                ctx,
                &check::join(path, "githubRepoContext"),
                "startingBranch",
                violations,
            );
        }
    }
}

impl Schema for CreateSessionRequest {
    const NAME: &'static str = "CreateSessionRequest";

    fn check(value: &Value, path: &str, violations: &mut Vec<Violation>) {
        if !check::expect_object(value, path, violations) {
            return;
        }
        check::require_nonempty_str(value, path, "prompt", violations);
        if let Some(ctx) = check::require_object(value, path, "sourceContext", violations) {
            SourceContext::check(ctx, &check::join(path, "sourceContext"), violations);
        }
        check::optional_str(value, path, "title", violations);
        check::optional_bool(value, path, "requirePlanApproval", violations);
    }
}

impl Schema for ListSessionsResponse {
    const NAME: &'static str = "ListSessionsResponse";

    fn check(value: &Value, path: &str, violations: &mut Vec<Violation>) {
        if !check::expect_object(value, path, violations) {
            return;
        }
        if let Some(items) = check::optional_array(value, path, "sessions", violations) {
            for (i, item) in items.iter().enumerate() {
                Session::check(item, &check::index(path, "sessions", i), violations);
            }
        }
        check::optional_str(value, path, "nextPageToken", violations);
    }
}
