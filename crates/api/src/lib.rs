//! HTTP status service for the PDV scaffold.
//!
//! Answers two stateless queries, liveness and deployment environment,
//! with structured logging (tracing) and Prometheus request counters.

pub mod config;
pub mod environment;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use environment::ProcessEnvironment;
use routes::status::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::scrape))
        .with_state(metrics_handle);

    Router::new()
        .route(common::STATUS_PATH, get(routes::status::get))
        .route(common::ENVIRONMENT_PATH, get(routes::status::environment))
        .with_state(state)
        .merge(metrics_router)
        .fallback(routes::fallback::not_found)
        // The status page is served from another origin.
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state that reads the deployment environment from
/// the process variable named in `config`.
pub fn create_default_state(config: &Config) -> Arc<AppState> {
    Arc::new(AppState::new(ProcessEnvironment::new(
        config.environment_var.as_str(),
    )))
}
