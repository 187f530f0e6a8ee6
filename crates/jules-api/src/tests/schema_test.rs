use serde_json::json;

use crate::schema::{decode, Schema};
use crate::types::{Activity, Artifact, CreateSessionRequest, Session, SessionState};

fn full_session_body() -> serde_json::Value {
    json!({
        "name": "sessions/31415926",
        "id": "31415926",
        "prompt": "Create a todo app",
        "sourceContext": {
            "source": "sources/github/owner/repo",
            "githubRepoContext": { "startingBranch": "main" }
        },
        "state": "IN_PROGRESS",
        "url": "https://jules.google.com/task/31415926",
        "createTime": "2025-01-01T12:00:00Z",
        "updateTime": "2025-01-01T12:05:00Z"
    })
}

#[test]
fn test_session_round_trip() {
    let session: Session = decode(full_session_body()).expect("session should validate");
    assert_eq!(session.id, "31415926");
    assert_eq!(session.state, SessionState::InProgress);
    assert_eq!(session.source_context.source, "sources/github/owner/repo");
    let branch = session
        .source_context
        .github_repo_context
        .expect("repo context present")
        .starting_branch;
    assert_eq!(branch, "main");
}

#[test]
fn test_session_missing_state_names_the_field() {
    let mut body = full_session_body();
    body.as_object_mut().unwrap().remove("state");

    let failure = decode::<Session>(body).unwrap_err();
    assert_eq!(failure.shape, "Session");
    assert!(failure.violations.iter().any(|v| v.path == "state"));
}

#[test]
fn test_session_numeric_id_names_the_field() {
    let mut body = full_session_body();
    body["id"] = json!(31415926);

    let failure = decode::<Session>(body).unwrap_err();
    let violation = failure
        .violations
        .iter()
        .find(|v| v.path == "id")
        .expect("violation for id");
    assert_eq!(violation.expected, "a string");
}

#[test]
fn test_all_violations_reported_at_once() {
    let mut body = full_session_body();
    body.as_object_mut().unwrap().remove("state");
    body["id"] = json!(42);
    body["sourceContext"]
        .as_object_mut()
        .unwrap()
        .remove("source");

    let failure = decode::<Session>(body).unwrap_err();
    let paths: Vec<&str> = failure.violations.iter().map(|v| v.path.as_str()).collect();
    assert!(paths.contains(&"state"));
    assert!(paths.contains(&"id"));
    assert!(paths.contains(&"sourceContext.source"));
}

#[test]
fn test_unknown_session_state_is_tolerated() {
    let state: SessionState = serde_json::from_value(json!("SOME_FUTURE_STATE")).unwrap();
    assert_eq!(state, SessionState::Unknown);
}

#[test]
fn test_activity_with_only_progress_update_validates() {
    let body = json!({
        "progressUpdated": { "title": "Writing tests", "description": "step 3 of 5" }
    });

    let activity: Activity = decode(body).expect("activity should validate");
    assert_eq!(activity.kind(), "progressUpdated");
    assert_eq!(activity.summary(), "Writing tests");
}

#[test]
fn test_activity_with_no_content_field_fails() {
    let body = json!({
        "name": "sessions/1/activities/2",
        "id": "2",
        "createTime": "2025-01-01T12:00:00Z"
    });

    let failure = decode::<Activity>(body).unwrap_err();
    assert!(failure
        .violations
        .iter()
        .any(|v| v.expected.starts_with("at least one of")));
}

#[test]
fn test_activity_content_subshape_is_checked() {
    let body = json!({
        "progressUpdated": { "description": "no title here" }
    });

    let failure = decode::<Activity>(body).unwrap_err();
    assert!(failure
        .violations
        .iter()
        .any(|v| v.path == "progressUpdated.title"));
}

#[test]
fn test_artifact_with_only_bash_output_validates() {
    let body = json!({
        "bashOutput": { "command": "cargo test", "output": "ok", "exitCode": 0 }
    });

    let artifact: Artifact = decode(body).expect("artifact should validate");
    assert_eq!(artifact.kind(), "bashOutput");
    assert_eq!(artifact.bash_output.unwrap().exit_code, Some(0));
}

#[test]
fn test_artifact_with_no_recognized_field_fails() {
    let failure = decode::<Artifact>(json!({ "somethingElse": {} })).unwrap_err();
    assert!(failure
        .violations
        .iter()
        .any(|v| v.expected.starts_with("at least one of")));
}

#[test]
fn test_create_session_request_passes_its_own_schema() {
    let request = CreateSessionRequest {
        prompt: "Create a todo app".to_string(),
        source_context: crate::types::SourceContext {
            source: "sources/github/owner/repo".to_string(),
            github_repo_context: Some(crate::types::GithubRepoContext {
                starting_branch: "main".to_string(),
            }),
        },
        title: None,
        require_plan_approval: None,
    };

    let body = serde_json::to_value(&request).unwrap();
    let mut violations = Vec::new();
    CreateSessionRequest::check(&body, "", &mut violations);
    assert!(violations.is_empty(), "unexpected violations: {violations:?}");
}

#[test]
fn test_create_session_request_blank_prompt_is_rejected() {
    let body = json!({
        "prompt": "   ",
        "sourceContext": { "source": "sources/github/owner/repo" }
    });

    let mut violations = Vec::new();
    CreateSessionRequest::check(&body, "", &mut violations);
    assert!(violations.iter().any(|v| v.path == "prompt"));
}

#[test]
fn test_non_object_payload_fails_with_root_violation() {
    let failure = decode::<Session>(json!("not an object")).unwrap_err();
    assert_eq!(failure.violations.len(), 1);
    assert_eq!(failure.violations[0].expected, "a JSON object");
}
