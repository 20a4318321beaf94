//! Premium API: insurance premium prediction service
//!
//! Validates user attributes, derives categorical features by fixed rules,
//! and asks a trained model for a premium estimate.
//!
//! ## Architecture
//!
//! - **Features**: input validation, city normalization, tier lookup, BMI /
//!   lifestyle risk / age group derivation
//! - **Model**: the prediction gateway and the JSON model artifact
//! - **API**: Axum handlers mapping outcomes to HTTP responses
//! - **Config**: TOML service configuration (server, model path, tier lists)

pub mod api;
pub mod config;
pub mod features;
pub mod model;
pub mod types;

// Re-export configuration
pub use config::ServiceConfig;

// Re-export commonly used types
pub use types::{
    AgeGroup, CityTier, DerivedFeatures, FeatureRow, LifestyleRisk, Occupation, PredictRequest,
    UserInput,
};

// Re-export feature pipeline
pub use features::{prepare, CityTierTable, ValidationError};

// Re-export model gateway
pub use model::{LinearArtifact, PredictionError, PredictionGateway, PremiumModel};
