//! Liveness and deployment environment endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::{EnvironmentReply, StatusReply};

use crate::environment::EnvironmentSource;

/// Shared application state accessible from the status handlers.
pub struct AppState {
    pub environment: Arc<dyn EnvironmentSource>,
}

impl AppState {
    pub fn new(environment: impl EnvironmentSource + 'static) -> Self {
        Self {
            environment: Arc::new(environment),
        }
    }
}

/// GET /api/test — reports that the API is up, stamped with the current UTC time.
#[tracing::instrument]
pub async fn get() -> Json<StatusReply> {
    tracing::info!("status endpoint called");
    metrics::counter!("status_requests_total").increment(1);
    Json(StatusReply::now())
}

/// GET /api/test/environment — reports the deployment environment, or
/// `"Not set"` when none is configured.
#[tracing::instrument(skip(state))]
pub async fn environment(State(state): State<Arc<AppState>>) -> Json<EnvironmentReply> {
    metrics::counter!("environment_requests_total").increment(1);
    Json(EnvironmentReply::from_value(state.environment.environment()))
}
