//! Prediction gateway over the trained premium model
//!
//! The model artifact is loaded once at startup and shared read-only by
//! every request. Callers only see the [`PremiumModel`] trait:
//!
//! ```ignore
//! let model = LinearArtifact::load_from_disk(Path::new("model/premium_model.json"))?;
//! let gateway = PredictionGateway::loaded(Arc::new(model));
//! let premium = gateway.predict_one(&features.to_row())?;
//! ```

mod artifact;
mod gateway;

pub use artifact::{ArtifactError, LinearArtifact, ARTIFACT_FEATURES};
pub use gateway::{PredictionGateway, UNAVAILABLE_VERSION};

use thiserror::Error;

use crate::types::FeatureRow;

/// A trained model that maps feature rows to premiums.
///
/// Implementations must be safe to call concurrently; no method takes
/// `&mut self`.
pub trait PremiumModel: Send + Sync {
    /// One prediction per row, in row order.
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, PredictionError>;

    /// Version identifier of the loaded artifact.
    fn version(&self) -> &str;
}

/// The model rejected a well-formed feature row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("model has not been loaded")]
    ModelNotLoaded,

    #[error("unknown category '{level}' for feature '{feature}' (row {row})")]
    UnknownCategory {
        row: usize,
        feature: String,
        level: String,
    },

    #[error("schema mismatch for feature '{feature}' (row {row}): {reason}")]
    SchemaMismatch {
        row: usize,
        feature: String,
        reason: String,
    },

    #[error("model produced a non-finite prediction for row {row}")]
    NonFinite { row: usize },

    #[error("model returned {got} predictions for {expected} rows")]
    OutputLength { expected: usize, got: usize },
}
