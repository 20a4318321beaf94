//! REST API module using Axum
//!
//! Endpoints:
//! - `GET /` - static welcome message
//! - `GET /health` - model readiness and version
//! - `POST /predict` - premium prediction from user attributes

pub mod envelope;
pub mod handlers;
mod routes;

pub use handlers::ServiceState;

use axum::http::{header, Method};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Build a CORS layer that is restrictive by default (same-origin only).
///
/// Set `PREMIUM_CORS_ORIGINS` to a comma-separated list of allowed origins
/// (e.g., `http://localhost:5173` for a local front end).
fn build_cors_layer() -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    match std::env::var("PREMIUM_CORS_ORIGINS") {
        Ok(origins) => {
            let allowed: Vec<_> = origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            tracing::info!(origins = %origins, "CORS: allowing configured origins");
            base.allow_origin(allowed)
        }
        Err(_) => base,
    }
}

/// Create the complete application router.
pub fn create_app(state: ServiceState, server: &ServerConfig) -> Router {
    routes::api_routes(state)
        .layer(RequestBodyLimitLayer::new(server.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
}
