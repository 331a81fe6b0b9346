//! The API application mounted under `/api/`.

use axum::{extract::OriginalUri, Router};

use crate::{errors::ServiceError, handlers, AppState};

/// Answers every unmatched `/api/...` path so those requests never reach
/// another part of the site.
pub async fn api_not_found(OriginalUri(uri): OriginalUri) -> ServiceError {
    ServiceError::NotFound(format!("No API endpoint at {}", uri.path()))
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(handlers::health::health_routes())
        .fallback(api_not_found)
}
