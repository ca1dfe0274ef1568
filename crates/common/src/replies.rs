use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed liveness message returned by the status query.
pub const STATUS_MESSAGE: &str = "API is working!";

/// Sentinel reported when no deployment environment is configured.
pub const ENVIRONMENT_NOT_SET: &str = "Not set";

/// Reply to the liveness query.
///
/// Built per request; `timestamp` is the wall-clock time at which the
/// request was handled and is never reused across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReply {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusReply {
    /// Creates a reply stamped with the current UTC time.
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// Creates a reply stamped with the given instant.
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            message: STATUS_MESSAGE.to_string(),
            timestamp,
        }
    }
}

/// Reply to the deployment environment query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentReply {
    pub environment: String,
}

impl EnvironmentReply {
    /// Builds a reply from an optional configured value, substituting
    /// [`ENVIRONMENT_NOT_SET`] when absent.
    pub fn from_value(value: Option<String>) -> Self {
        Self {
            environment: value.unwrap_or_else(|| ENVIRONMENT_NOT_SET.to_string()),
        }
    }
}
