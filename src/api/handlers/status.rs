//! Static endpoints: home and health

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::config::defaults::{HEALTH_MESSAGE, WELCOME_MESSAGE};

use super::ServiceState;

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub message: &'static str,
}

/// GET / - Human-readable description of the API
pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: WELCOME_MESSAGE,
    })
}

// ============================================================================
// Health Endpoint
// ============================================================================

/// Machine-readable readiness for load balancers and orchestrators
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the process is serving
    pub status: &'static str,
    pub message: &'static str,
    /// Artifact version (or override) established at startup
    pub model_version: String,
    /// Whether `/predict` can be served
    pub model_loaded: bool,
}

/// GET /health - Reflects the gateway's startup state
pub async fn health_check(State(state): State<ServiceState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: HEALTH_MESSAGE,
        model_version: state.gateway.model_version().to_string(),
        model_loaded: state.gateway.model_loaded(),
    })
}
