//! Handler for requests that match no route.

use axum::http::Uri;

use crate::error::ApiError;

/// Any unmatched path — returns a JSON 404.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
