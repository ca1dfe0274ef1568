//! Request counters exposed for Prometheus scraping.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use metrics_exporter_prometheus::PrometheusHandle;

const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// GET /metrics
pub async fn scrape(State(recorder): State<PrometheusHandle>) -> impl IntoResponse {
    let exposition = recorder.render();
    ([(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)], exposition)
}
