use std::sync::Arc;

use futures::Stream;
use serde_json::json;

use crate::config::{Config, RetryPolicy};
use crate::error::JulesError;
use crate::executor::Executor;
use crate::logging::{default_logger, RequestLogger};
use crate::pagination::{FetchFuture, Paginator};
use crate::schema::{self, Schema};
use crate::transport::{RequestDescriptor, Transport};
use crate::types::{
    Activity, CreateSessionRequest, ListActivitiesResponse, ListSessionsResponse,
    ListSourcesResponse, Session, Source,
};
use crate::Result;

/// The main client for interacting with the Jules API.
///
/// Cheap to clone; clones share the connection pool and configuration.
/// Each call keeps its own request state, so concurrent calls through one
/// client are independent.
#[derive(Clone)]
pub struct JulesClient {
    executor: Executor,
}

impl JulesClient {
    /// Creates a new `JulesClient` from a given configuration.
    pub fn new(config: Config) -> Self {
        Self::with_logger(config, default_logger())
    }

    /// Creates a new `JulesClient` that reports through `logger`.
    pub fn with_logger(config: Config, logger: Arc<dyn RequestLogger>) -> Self {
        let transport = Transport::new(&config, Arc::clone(&logger));
        Self {
            executor: Executor::new(transport, logger),
        }
    }

    /// Creates a new `JulesClient` with a custom `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        let logger = default_logger();
        let transport = Transport::with_client(
            client,
            base_url,
            api_key,
            RetryPolicy::default(),
            Arc::clone(&logger),
        );
        Self {
            executor: Executor::new(transport, logger),
        }
    }

    pub async fn list_sources(
        &self,
        page_size: Option<u32>,
        page_token: Option<&str>,
        filter: Option<&str>,
    ) -> Result<ListSourcesResponse> {
        let mut request = RequestDescriptor::get("/sources");
        if let Some(size) = page_size {
            request = request.query("pageSize", size.to_string());
        }
        if let Some(token) = page_token {
            request = request.query("pageToken", token);
        }
        if let Some(filter) = filter {
            request = request.query("filter", filter);
        }
        self.executor.run(request).await
    }

    pub async fn get_source(&self, source_id: &str) -> Result<Source> {
        let request = RequestDescriptor::get(format!("/sources/{source_id}"));
        self.executor.run(request).await
    }

    /// Creates a session. The request is checked against its own schema
    /// before anything is sent; a malformed request fails with
    /// [`JulesError::Precondition`] and no network call is made.
    pub async fn create_session(&self, req: CreateSessionRequest) -> Result<Session> {
        let body = serde_json::to_value(&req)
            .map_err(|err| JulesError::precondition(err.to_string()))?;
        let mut violations = Vec::new();
        CreateSessionRequest::check(&body, "", &mut violations);
        if !violations.is_empty() {
            return Err(JulesError::precondition(format!(
                "create-session request rejected: {}",
                schema::describe(&violations)
            )));
        }
        let request = RequestDescriptor::post("/sessions").body(body);
        self.executor.run(request).await
    }

    pub async fn list_sessions(
        &self,
        page_size: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<ListSessionsResponse> {
        let mut request = RequestDescriptor::get("/sessions");
        if let Some(size) = page_size {
            request = request.query("pageSize", size.to_string());
        }
        if let Some(token) = page_token {
            request = request.query("pageToken", token);
        }
        self.executor.run(request).await
    }

    pub async fn get_session(&self, session_id: &str) -> Result<Session> {
        let request = RequestDescriptor::get(format!("/sessions/{session_id}"));
        self.executor.run(request).await
    }

    /// Approves the latest plan of a session awaiting approval. Side effect
    /// only; the response body is not validated.
    pub async fn approve_plan(&self, session_id: &str) -> Result<()> {
        let request = RequestDescriptor::post(format!("/sessions/{session_id}:approvePlan"));
        self.executor.run_empty(request).await
    }

    pub async fn list_activities(
        &self,
        session_id: &str,
        page_size: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<ListActivitiesResponse> {
        let mut request = RequestDescriptor::get(format!("/sessions/{session_id}/activities"));
        if let Some(size) = page_size {
            request = request.query("pageSize", size.to_string());
        }
        if let Some(token) = page_token {
            request = request.query("pageToken", token);
        }
        self.executor.run(request).await
    }

    pub async fn get_activity(&self, session_id: &str, activity_id: &str) -> Result<Activity> {
        let request =
            RequestDescriptor::get(format!("/sessions/{session_id}/activities/{activity_id}"));
        self.executor.run(request).await
    }

    /// Sends a user message into a session. The prompt must contain
    /// something other than whitespace; an empty prompt fails with
    /// [`JulesError::Precondition`] and no network call is made.
    pub async fn send_message(&self, session_id: &str, prompt: &str) -> Result<()> {
        if prompt.trim().is_empty() {
            return Err(JulesError::precondition(
                "message prompt must not be empty",
            ));
        }
        let request = RequestDescriptor::post(format!("/sessions/{session_id}:sendMessage"))
            .body(json!({ "prompt": prompt }));
        self.executor.run_empty(request).await
    }

    /// Streams sources across pages.
    pub fn stream_sources(
        &self,
        page_size: Option<u32>,
        filter: Option<String>,
    ) -> impl Stream<Item = Result<Source>> {
        let client = self.clone();
        Paginator::new(move |token| {
            let client = client.clone();
            let filter = filter.clone();
            let page: FetchFuture<ListSourcesResponse> = Box::pin(async move {
                client
                    .list_sources(page_size, token.as_deref(), filter.as_deref())
                    .await
            });
            page
        })
    }

    /// Streams sessions across pages.
    pub fn stream_sessions(&self, page_size: Option<u32>) -> impl Stream<Item = Result<Session>> {
        let client = self.clone();
        Paginator::new(move |token| {
            let client = client.clone();
            let page: FetchFuture<ListSessionsResponse> =
                Box::pin(async move { client.list_sessions(page_size, token.as_deref()).await });
            page
        })
    }

    /// Streams a session's activities across pages.
    pub fn stream_activities(
        &self,
        session_id: &str,
        page_size: Option<u32>,
    ) -> impl Stream<Item = Result<Activity>> {
        let client = self.clone();
        let session_id = session_id.to_string();
        Paginator::new(move |token| {
            let client = client.clone();
            let session_id = session_id.clone();
            let page: FetchFuture<ListActivitiesResponse> = Box::pin(async move {
                client
                    .list_activities(&session_id, page_size, token.as_deref())
                    .await
            });
            page
        })
    }
}

impl std::fmt::Debug for JulesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JulesClient")
            .field("base_url", &self.executor.transport().base_url())
            .finish_non_exhaustive()
    }
}
