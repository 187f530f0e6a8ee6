use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::HeaderValue;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::RetryPolicy;
use crate::error::TransportError;
use crate::logging::{MockRequestLogger, NoopLogger, RequestLogger};
use crate::transport::{backoff_delay, parse_retry_after, RequestDescriptor, Transport};

fn policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        initial_delay_ms: 1,
        max_delay_ms: 50,
        ..RetryPolicy::default()
    }
}

fn transport(server: &MockServer, policy: RetryPolicy) -> Transport {
    transport_with_logger(server, policy, Arc::new(NoopLogger))
}

fn transport_with_logger(
    server: &MockServer,
    policy: RetryPolicy,
    logger: Arc<dyn RequestLogger>,
) -> Transport {
    Transport::with_client(
        reqwest::Client::new(),
        &server.uri(),
        "test-key",
        policy,
        logger,
    )
}

#[tokio::test]
async fn test_no_retries_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sources"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport(&server, policy(0));
    let result = transport.execute(&RequestDescriptor::get("/sources")).await;

    let err = result.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.attempts(), 1);
}

#[tokio::test]
async fn test_terminal_status_is_never_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sources/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport(&server, policy(3));
    let err = transport
        .execute(&RequestDescriptor::get("/sources/missing"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.attempts(), 1);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_retry_budget_is_exhausted_then_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let transport = transport(&server, policy(2));
    let err = transport.execute(&RequestDescriptor::get("/sessions")).await.unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert_eq!(err.attempts(), 3);
    assert!(err.is_retryable());
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_recovers_after_transient_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"sessions\": []}"))
        .mount(&server)
        .await;

    let transport = transport(&server, policy(1));
    let response = transport
        .execute(&RequestDescriptor::get("/sessions"))
        .await
        .expect("second attempt should succeed");

    assert_eq!(response.status, 200);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_backoff_delays_elapse_between_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let retry = RetryPolicy {
        max_retries: 2,
        initial_delay_ms: 100,
        max_delay_ms: 10_000,
        ..RetryPolicy::default()
    };
    let transport = transport(&server, retry);

    let started = Instant::now();
    let _ = transport.execute(&RequestDescriptor::get("/sessions")).await;
    // 100ms before the first retry, 200ms before the second.
    assert!(started.elapsed() >= Duration::from_millis(300));
}

#[tokio::test]
async fn test_retry_after_header_overrides_backoff() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"sessions\": []}"))
        .mount(&server)
        .await;

    // The computed backoff would be 1ms; only the header explains a 1s wait.
    let transport = transport(&server, policy(1));
    let started = Instant::now();
    let response = transport
        .execute(&RequestDescriptor::get("/sessions"))
        .await
        .expect("retry should succeed");

    assert_eq!(response.status, 200);
    assert!(started.elapsed() >= Duration::from_secs(1));
}

#[tokio::test]
async fn test_timeout_counts_as_connection_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let transport = Transport::with_client(
        http,
        &server.uri(),
        "test-key",
        policy(0),
        Arc::new(NoopLogger),
    );

    let err = transport.execute(&RequestDescriptor::get("/sessions")).await.unwrap_err();
    assert!(matches!(err, TransportError::Connection { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_error_body_is_parsed_when_present() {
    let server = MockServer::start().await;
    let body = "{\"error\": {\"code\": 400, \"message\": \"prompt is required\", \"status\": \"INVALID_ARGUMENT\"}}";
    Mock::given(method("POST"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(400).set_body_string(body))
        .mount(&server)
        .await;

    let transport = transport(&server, policy(0));
    let err = transport
        .execute(&RequestDescriptor::post("/sessions"))
        .await
        .unwrap_err();

    match err {
        TransportError::Status { status, error, .. } => {
            assert_eq!(status, 400);
            let error = error.expect("error body should parse");
            assert_eq!(error.message, "prompt is required");
            assert_eq!(error.status, "INVALID_ARGUMENT");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_api_key_header_is_attached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sources"))
        .and(header("X-Goog-Api-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"sources\": []}"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport(&server, policy(0));
    let response = transport.execute(&RequestDescriptor::get("/sources")).await;
    assert!(response.is_ok());
}

#[tokio::test]
async fn test_logger_sees_retries_and_exhaustion() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut logger = MockRequestLogger::new();
    logger.expect_debug().returning(|_| ());
    logger.expect_warn().times(2).returning(|_| ());
    logger.expect_error().times(1).returning(|_| ());

    let transport = transport_with_logger(&server, policy(2), Arc::new(logger));
    let _ = transport.execute(&RequestDescriptor::get("/sessions")).await;
}

#[test]
fn test_backoff_doubles_and_caps() {
    let retry = RetryPolicy {
        max_retries: 5,
        initial_delay_ms: 100,
        max_delay_ms: 300,
        ..RetryPolicy::default()
    };

    assert_eq!(backoff_delay(&retry, 1), Duration::from_millis(100));
    assert_eq!(backoff_delay(&retry, 2), Duration::from_millis(200));
    assert_eq!(backoff_delay(&retry, 3), Duration::from_millis(300));
    assert_eq!(backoff_delay(&retry, 4), Duration::from_millis(300));
}

#[test]
fn test_retry_after_parses_seconds() {
    let value = HeaderValue::from_static("2");
    assert_eq!(parse_retry_after(Some(&value)), Some(Duration::from_secs(2)));
}

#[test]
fn test_retry_after_date_in_the_past_floors_to_zero() {
    let value = HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT");
    assert_eq!(parse_retry_after(Some(&value)), Some(Duration::ZERO));
}

#[test]
fn test_retry_after_garbage_is_ignored() {
    let value = HeaderValue::from_static("soon");
    assert_eq!(parse_retry_after(Some(&value)), None);
    assert_eq!(parse_retry_after(None), None);
}
