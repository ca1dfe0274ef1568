//! Wire types shared by the PDV status service and its client.

pub mod replies;

pub use replies::{ENVIRONMENT_NOT_SET, EnvironmentReply, STATUS_MESSAGE, StatusReply};

/// Route of the liveness query.
pub const STATUS_PATH: &str = "/api/test";

/// Route of the deployment environment query.
pub const ENVIRONMENT_PATH: &str = "/api/test/environment";
