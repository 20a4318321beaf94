//! API route handlers
//!
//! - Static welcome and health endpoints
//! - Premium prediction

mod predict;
mod status;

pub use predict::*;
pub use status::*;

use std::sync::Arc;

use crate::features::CityTierTable;
use crate::model::PredictionGateway;

// ============================================================================
// API State
// ============================================================================

/// Shared, read-only state for API handlers
#[derive(Clone, Debug)]
pub struct ServiceState {
    /// Model handle established at startup
    pub gateway: PredictionGateway,
    /// City tier membership lists
    pub tiers: Arc<CityTierTable>,
}

impl ServiceState {
    pub fn new(gateway: PredictionGateway, tiers: Arc<CityTierTable>) -> Self {
        Self { gateway, tiers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_state() -> ServiceState {
        ServiceState::new(PredictionGateway::unloaded(), Arc::new(CityTierTable::default()))
    }

    #[tokio::test]
    async fn test_home() {
        let response = home().await;
        assert!(response.message.contains("/predict"));
    }

    #[tokio::test]
    async fn test_health_reports_unloaded_model() {
        let response = health_check(axum::extract::State(create_test_state())).await;
        assert_eq!(response.status, "ok");
        assert!(!response.model_loaded);
        assert_eq!(response.model_version, crate::model::UNAVAILABLE_VERSION);
    }
}
