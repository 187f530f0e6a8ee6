use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{check, Schema, Violation};

/// Content fields an activity may carry. The API sends no discriminator
/// tag; a payload is valid as long as at least one of these is present.
const ACTIVITY_CONTENT_FIELDS: &[&str] = &[
    "agentMessaged",
    "userMessaged",
    "planGenerated",
    "planApproved",
    "progressUpdated",
    "sessionCompleted",
    "sessionFailed",
];

const ARTIFACT_CONTENT_FIELDS: &[&str] = &["changeSet", "media", "bashOutput"];

/// One recorded event within a session.
///
/// The envelope fields are all optional; the only hard constraint is that at
/// least one recognized content field is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Full resource name, e.g. `sessions/31415926/activities/42`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub originator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_messaged: Option<AgentMessaged>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_messaged: Option<UserMessaged>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_generated: Option<PlanGenerated>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_approved: Option<PlanApproved>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_updated: Option<ProgressUpdated>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_completed: Option<SessionCompleted>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_failed: Option<SessionFailed>,
}

impl Activity {
    /// Name of the first content field present. Payloads are accepted with
    /// more than one; the declaration order above decides which wins here.
    pub fn kind(&self) -> &'static str {
        if self.agent_messaged.is_some() {
            "agentMessaged"
        } else if self.user_messaged.is_some() {
            "userMessaged"
        } else if self.plan_generated.is_some() {
            "planGenerated"
        } else if self.plan_approved.is_some() {
            "planApproved"
        } else if self.progress_updated.is_some() {
            "progressUpdated"
        } else if self.session_completed.is_some() {
            "sessionCompleted"
        } else if self.session_failed.is_some() {
            "sessionFailed"
        } else {
            "unknown"
        }
    }

    /// One-line human-readable rendering of the content, for display.
    pub fn summary(&self) -> String {
        if let Some(m) = &self.agent_messaged {
            m.agent_message.clone()
        } else if let Some(m) = &self.user_messaged {
            m.user_message.clone()
        } else if let Some(p) = &self.plan_generated {
            format!("plan with {} step(s)", p.steps.len())
        } else if self.plan_approved.is_some() {
            "plan approved".to_string()
        } else if let Some(p) = &self.progress_updated {
            p.title.clone()
        } else if self.session_completed.is_some() {
            "session completed".to_string()
        } else if let Some(f) = &self.session_failed {
            f.title.clone().unwrap_or_else(|| "session failed".to_string())
        } else {
            String::new()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentMessaged {
    pub agent_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMessaged {
    pub user_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanGenerated {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<PlanStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStep {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanApproved {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdated {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCompleted {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFailed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Attached output of an activity. Same optional-content shape as the
/// activity itself: at least one recognized field, no discriminator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_set: Option<ChangeSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bash_output: Option<BashOutput>,
}

impl Artifact {
    pub fn kind(&self) -> &'static str {
        if self.change_set.is_some() {
            "changeSet"
        } else if self.media.is_some() {
            "media"
        } else if self.bash_output.is_some() {
            "bashOutput"
        } else {
            "unknown"
        }
    }
}

/// A set of code changes produced by the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_patch: Option<GitPatch>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unidiff_patch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_commit_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BashOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListActivitiesResponse {
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl Schema for Activity {
    const NAME: &'static str = "Activity";

    fn check(value: &Value, path: &str, violations: &mut Vec<Violation>) {
        if !check::expect_object(value, path, violations) {
            return;
        }
        check::optional_str(value, path, "name", violations);
        check::optional_str(value, path, "id", violations);
        check::optional_str(value, path, "description", violations);
        check::optional_str(value, path, "originator", violations);
        check::optional_str(value, path, "createTime", violations);

        if let Some(items) = check::optional_array(value, path, "artifacts", violations) {
            for (i, item) in items.iter().enumerate() {
                Artifact::check(item, &check::index(path, "artifacts", i), violations);
            }
        }

        check::require_one_of(value, path, ACTIVITY_CONTENT_FIELDS, violations);

        if let Some(v) = check::optional_object(value, path, "agentMessaged", violations) {
            check::require_str(v, &check::join(path, "agentMessaged"), "agentMessage", violations);
        }
        if let Some(v) = check::optional_object(value, path, "userMessaged", violations) {
            check::require_str(v, &check::join(path, "userMessaged"), "userMessage", violations);
        }
        if let Some(v) = check::optional_object(value, path, "planGenerated", violations) {
            let plan_path = check::join(path, "planGenerated");
            check::optional_str(v, &plan_path, "planId", violations);
            if let Some(steps) = check::optional_array(v, &plan_path, "steps", violations) {
                for (i, step) in steps.iter().enumerate() {
                    let step_path = check::index(&plan_path, "steps", i);
                    check::require_str(step, &step_path, "id", violations);
                    check::require_str(step, &step_path, "title", violations);
                    check::optional_str(step, &step_path, "description", violations);
                    check::optional_int(step, &step_path, "index", violations);
                }
            }
        }
        if let Some(v) = check::optional_object(value, path, "planApproved", violations) {
            check::optional_str(v, &check::join(path, "planApproved"), "planId", violations);
        }
        if let Some(v) = check::optional_object(value, path, "progressUpdated", violations) {
            let progress_path = check::join(path, "progressUpdated");
            check::require_str(v, &progress_path, "title", violations);
            check::optional_str(v, &progress_path, "description", violations);
        }
        check::optional_object(value, path, "sessionCompleted", violations);
        if let Some(v) = check::optional_object(value, path, "sessionFailed", violations) {
            let failed_path = check::join(path, "sessionFailed");
            check::optional_str(v, &failed_path, "title", violations);
            check::optional_str(v, &failed_path, "description", violations);
        }
    }
}

impl Schema for Artifact {
    const NAME: &'static str = "Artifact";

    fn check(value: &Value, path: &str, violations: &mut Vec<Violation>) {
        if !check::expect_object(value, path, violations) {
            return;
        }
        check::require_one_of(value, path, ARTIFACT_CONTENT_FIELDS, violations);

        if let Some(v) = check::optional_object(value, path, "changeSet", violations) {
            let change_path = check::join(path, "changeSet");
            check::optional_str(v, &change_path, "source", violations);
            if let Some(patch) = check::optional_object(v, &change_path, "gitPatch", violations) {
                let patch_path = check::join(&change_path, "gitPatch");
                check::optional_str(patch, &patch_path, "unidiffPatch", violations);
                check::optional_str(patch, &patch_path, "baseCommitId", violations);
            }
        }
        if let Some(v) = check::optional_object(value, path, "media", violations) {
            let media_path = check::join(path, "media");
            check::optional_str(v, &media_path, "data", violations);
            check::optional_str(v, &media_path, "mimeType", violations);
        }
        if let Some(v) = check::optional_object(value, path, "bashOutput", violations) {
            let bash_path = check::join(path, "bashOutput");
            check::optional_str(v, &bash_path, "command", violations);
            check::optional_str(v, &bash_path, "output", violations);
            check::optional_int(v, &bash_path, "exitCode", violations);
        }
    }
}

impl Schema for ListActivitiesResponse {
    const NAME: &'static str = "ListActivitiesResponse";

    fn check(value: &Value, path: &str, violations: &mut Vec<Violation>) {
        if !check::expect_object(value, path, violations) {
            return;
        }
        if let Some(items) = check::optional_array(value, path, "activities", violations) {
            for (i, item) in items.iter().enumerate() {
                Activity::check(item, &check::index(path, "activities", i), violations);
            }
        }
        check::optional_str(value, path, "nextPageToken", violations);
    }
}
