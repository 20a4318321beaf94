//! API route definitions

use axum::{routing::{get, post}, Router};

use super::handlers::{self, ServiceState};

/// Create all API routes
pub fn api_routes(state: ServiceState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health_check))
        .route("/predict", post(handlers::predict_premium))
        .with_state(state)
}
