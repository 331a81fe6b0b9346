//! Top-level URL routing: admin site, API application and debug media files.

use axum::{extract::OriginalUri, middleware, Router};
use http::HeaderValue;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
};
use tracing::{info, warn};

use crate::{
    config::AppConfig, errors::ServiceError, handlers::admin::admin_routes, middleware_helpers,
    AppState,
};

/// Normalises the configured media URL into a route prefix.
///
/// Returns `None` when nothing should be mounted: absolute URLs point at an
/// external host, and an empty or root prefix is never served.
pub fn media_prefix(media_url: &str) -> Option<String> {
    let trimmed = media_url.trim();
    if trimmed.contains("://") || trimmed.starts_with("//") {
        return None;
    }
    let path = trimmed.trim_matches('/');
    if path.is_empty() {
        None
    } else {
        Some(format!("/{}", path))
    }
}

/// Builds the CORS layer from the configured origins.
pub fn cors_layer(cfg: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cfg
        .cors_allowed_origins
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if !origins.is_empty() {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    } else if cfg.should_allow_permissive_cors() {
        CorsLayer::permissive()
    } else {
        warn!("No CORS origins configured; cross-origin requests will be refused");
        CorsLayer::new()
    }
}

async fn not_found(OriginalUri(uri): OriginalUri) -> ServiceError {
    ServiceError::NotFound(format!("No route for {}", uri.path()))
}

/// Composes the site: `/admin/` for the admin interface, `/api/` for the
/// supplied API router and, in debug mode only, `media_url` for uploads.
pub fn build_router(state: AppState, api: Router<AppState>) -> Router {
    let mut app = Router::new().merge(admin_routes()).nest("/api", api);

    if state.config.debug {
        match media_prefix(&state.config.media_url) {
            Some(prefix) => {
                info!(
                    prefix = %prefix,
                    root = %state.config.media_root.display(),
                    "serving media files"
                );
                app = app.nest_service(&prefix, ServeDir::new(&state.config.media_root));
            }
            None => info!(
                media_url = %state.config.media_url,
                "media URL is not a local prefix; media files are not served"
            ),
        }
    }

    let cors = cors_layer(&state.config);

    app.fallback(not_found)
        .layer(crate::tracing::configure_http_tracing())
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(middleware::from_fn(
            middleware_helpers::security_headers_middleware,
        ))
        .layer(middleware::from_fn(
            middleware_helpers::request_id_middleware,
        ))
        .with_state(state)
}
