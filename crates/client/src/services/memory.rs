//! In-memory [`StatusApi`] for testing.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use common::{EnvironmentReply, StatusReply};
use serde::de::DeserializeOwned;

use super::StatusApi;
use crate::error::{ClientError, ClientResult};

/// Canned outcome for one query.
#[derive(Debug, Clone)]
pub enum Stubbed<T> {
    /// A well-formed 2xx reply.
    Reply(T),
    /// The service cannot be reached.
    Unreachable,
    /// The service answers with this non-2xx status.
    Status(u16),
    /// A 2xx reply whose body is missing the expected fields.
    Malformed,
}

impl<T: Clone + DeserializeOwned> Stubbed<T> {
    fn resolve(&self) -> ClientResult<T> {
        match self {
            Stubbed::Reply(reply) => Ok(reply.clone()),
            Stubbed::Unreachable => Err(ClientError::Unavailable("connection refused".to_string())),
            Stubbed::Status(status) => Err(ClientError::Api {
                status: *status,
                body: String::new(),
            }),
            // An empty object lacks every reply field.
            Stubbed::Malformed => Ok(serde_json::from_str::<T>("{}")?),
        }
    }
}

#[derive(Debug)]
struct InMemoryStatusState {
    status: Stubbed<StatusReply>,
    environment: Stubbed<EnvironmentReply>,
    status_delay: Duration,
    environment_delay: Duration,
    status_calls: usize,
    environment_calls: usize,
}

/// In-memory status service for testing.
///
/// Replies immediately with a fresh [`StatusReply`] and a `"Development"`
/// environment unless configured otherwise.
#[derive(Debug, Clone)]
pub struct InMemoryStatusApi {
    state: Arc<RwLock<InMemoryStatusState>>,
}

impl Default for InMemoryStatusApi {
    fn default() -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryStatusState {
                status: Stubbed::Reply(StatusReply::now()),
                environment: Stubbed::Reply(EnvironmentReply::from_value(Some(
                    "Development".to_string(),
                ))),
                status_delay: Duration::ZERO,
                environment_delay: Duration::ZERO,
                status_calls: 0,
                environment_calls: 0,
            })),
        }
    }
}

impl InMemoryStatusApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the outcome of the status query.
    pub fn set_status(&self, outcome: Stubbed<StatusReply>) {
        self.state.write().unwrap().status = outcome;
    }

    /// Sets the outcome of the environment query.
    pub fn set_environment(&self, outcome: Stubbed<EnvironmentReply>) {
        self.state.write().unwrap().environment = outcome;
    }

    /// Delays every status reply by `delay`.
    pub fn set_status_delay(&self, delay: Duration) {
        self.state.write().unwrap().status_delay = delay;
    }

    /// Delays every environment reply by `delay`.
    pub fn set_environment_delay(&self, delay: Duration) {
        self.state.write().unwrap().environment_delay = delay;
    }

    /// Returns how many status queries were received.
    pub fn status_calls(&self) -> usize {
        self.state.read().unwrap().status_calls
    }

    /// Returns how many environment queries were received.
    pub fn environment_calls(&self) -> usize {
        self.state.read().unwrap().environment_calls
    }
}

#[async_trait]
impl StatusApi for InMemoryStatusApi {
    async fn fetch_status(&self) -> ClientResult<StatusReply> {
        let (delay, outcome) = {
            let mut state = self.state.write().unwrap();
            state.status_calls += 1;
            (state.status_delay, state.status.clone())
        };
        tokio::time::sleep(delay).await;
        outcome.resolve()
    }

    async fn fetch_environment(&self) -> ClientResult<EnvironmentReply> {
        let (delay, outcome) = {
            let mut state = self.state.write().unwrap();
            state.environment_calls += 1;
            (state.environment_delay, state.environment.clone())
        };
        tokio::time::sleep(delay).await;
        outcome.resolve()
    }
}
