//! Transport to the status service: the trait, the HTTP implementation, and
//! an in-memory stand-in for tests.

pub mod http;
pub mod memory;

use async_trait::async_trait;
use common::{EnvironmentReply, StatusReply};

use crate::error::ClientResult;

pub use http::HttpStatusApi;
pub use memory::{InMemoryStatusApi, Stubbed};

/// The two queries the status page issues.
#[async_trait]
pub trait StatusApi: Send + Sync {
    /// GET /api/test
    async fn fetch_status(&self) -> ClientResult<StatusReply>;

    /// GET /api/test/environment
    async fn fetch_environment(&self) -> ClientResult<EnvironmentReply>;
}
