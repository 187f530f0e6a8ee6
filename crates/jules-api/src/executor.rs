//! One validated request: transport exchange, then schema check
//!
//! Retries are exclusively a transport concern. A response that fails
//! validation is never retried; resending an identical request cannot fix a
//! shape mismatch.

use std::sync::Arc;
use std::time::Instant;

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::logging::RequestLogger;
use crate::schema::{self, Schema, ValidationFailure, Violation};
use crate::transport::{RequestDescriptor, Transport};
use crate::Result;

#[derive(Clone)]
pub(crate) struct Executor {
    transport: Transport,
    logger: Arc<dyn RequestLogger>,
}

impl Executor {
    pub fn new(transport: Transport, logger: Arc<dyn RequestLogger>) -> Self {
        Self { transport, logger }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Issue `request` and validate the response body as `T`.
    pub async fn run<T>(&self, request: RequestDescriptor) -> Result<T>
    where
        T: Schema + for<'de> Deserialize<'de>,
    {
        let call_id = Uuid::new_v4();
        let started = Instant::now();

        let raw = self.transport.execute(&request).await?;

        match parse_body::<T>(&raw.body).and_then(schema::decode::<T>) {
            Ok(typed) => {
                self.logger.debug(&format!(
                    "[{call_id}] {} {} -> {} in {:?}",
                    request.method,
                    request.path,
                    T::NAME,
                    started.elapsed()
                ));
                Ok(typed)
            }
            Err(failure) => {
                self.logger.error(&format!(
                    "[{call_id}] {} {} response is not a valid {}: {failure}",
                    request.method,
                    request.path,
                    T::NAME
                ));
                Err(failure.into())
            }
        }
    }

    /// Issue `request` for its side effect only. The body, if any, is not
    /// validated; only the transport's success/failure classification counts.
    pub async fn run_empty(&self, request: RequestDescriptor) -> Result<()> {
        let call_id = Uuid::new_v4();
        let started = Instant::now();

        self.transport.execute(&request).await?;
        self.logger.debug(&format!(
            "[{call_id}] {} {} -> ok in {:?}",
            request.method,
            request.path,
            started.elapsed()
        ));
        Ok(())
    }
}

/// An HTTP-successful body that is not JSON at all still counts as a
/// validation failure, with the raw text kept for diagnosis.
fn parse_body<T: Schema>(body: &str) -> std::result::Result<Value, ValidationFailure> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|err| ValidationFailure {
        shape: T::NAME,
        raw: Value::String(body.to_string()),
        violations: vec![Violation::new("", format!("a JSON document ({err})"))],
    })
}
