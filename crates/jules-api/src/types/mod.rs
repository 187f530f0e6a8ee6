//! Type exports

pub mod activity;
pub mod session;
pub mod source;

pub use activity::{
    Activity, AgentMessaged, Artifact, BashOutput, ChangeSet, GitPatch, ListActivitiesResponse,
    Media, PlanApproved, PlanGenerated, PlanStep, ProgressUpdated, SessionCompleted,
    SessionFailed, UserMessaged,
};
pub use session::{
    CreateSessionRequest, GithubRepoContext, ListSessionsResponse, Session, SessionState,
    SourceContext,
};
pub use source::{GithubRepo, ListSourcesResponse, Source};
