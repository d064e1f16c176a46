/// Maskmail API - HTTP surface for alias generation and forwarding
///
/// Thin axum shell over `maskmail-core`: it decodes requests, calls the
/// alias and forwarding services and maps the error taxonomy to statuses.
pub mod api;
pub mod context;
pub mod error;
pub mod middleware;

pub use context::ApiContext;
pub use error::ApiError;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use maskmail_core::constants::MAX_REQUEST_BODY_BYTES;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

/// Build the application router
pub fn build_router(ctx: Arc<ApiContext>) -> Router {
    let api = Router::new()
        .route("/generate", post(api::generate::handler))
        .route("/forward", post(api::forward::handler));

    Router::new()
        // Liveness probe
        .route("/", get(api::health::liveness))
        .route("/health", get(api::health::handler))
        .nest("/api", api)
        .route_layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(cors_layer(&ctx.config.cors_origin))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .with_state(ctx)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = if origin == "*" {
        AllowOrigin::from(Any)
    } else {
        match HeaderValue::from_str(origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(e) => {
                warn!(
                    origin = %origin,
                    error = %e,
                    "Invalid CORS origin, cross-origin requests disabled"
                );
                AllowOrigin::list(Vec::<HeaderValue>::new())
            }
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
