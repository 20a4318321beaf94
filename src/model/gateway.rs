//! Process-wide handle to the loaded model

use std::sync::Arc;

use tracing::{debug, error};

use super::{PredictionError, PremiumModel};
use crate::types::FeatureRow;

/// Version reported when no model is loaded.
pub const UNAVAILABLE_VERSION: &str = "unavailable";

/// Read-only wrapper around the model, built once at startup and cloned into
/// every request handler.
#[derive(Clone)]
pub struct PredictionGateway {
    model: Option<Arc<dyn PremiumModel>>,
    version_override: Option<String>,
}

impl std::fmt::Debug for PredictionGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionGateway")
            .field("model_loaded", &self.model_loaded())
            .field("model_version", &self.model_version())
            .finish()
    }
}

impl PredictionGateway {
    pub fn loaded(model: Arc<dyn PremiumModel>) -> Self {
        Self {
            model: Some(model),
            version_override: None,
        }
    }

    /// A gateway with no model; `/predict` answers 503 and `/health` reports
    /// `model_loaded: false`.
    pub fn unloaded() -> Self {
        Self {
            model: None,
            version_override: None,
        }
    }

    /// Report `version` instead of the artifact's own identifier.
    #[must_use]
    pub fn with_version_override(mut self, version: Option<String>) -> Self {
        self.version_override = version;
        self
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn model_version(&self) -> &str {
        match (&self.version_override, &self.model) {
            (Some(v), _) => v,
            (None, Some(model)) => model.version(),
            (None, None) => UNAVAILABLE_VERSION,
        }
    }

    /// Run the model over `rows`. Errors from the model are passed through.
    pub fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, PredictionError> {
        let model = self.model.as_ref().ok_or(PredictionError::ModelNotLoaded)?;

        let predictions = model.predict(rows).inspect_err(|e| {
            error!(error = %e, rows = rows.len(), "Model rejected feature rows");
        })?;

        if predictions.len() != rows.len() {
            return Err(PredictionError::OutputLength {
                expected: rows.len(),
                got: predictions.len(),
            });
        }

        debug!(rows = rows.len(), "Model inference complete");
        Ok(predictions)
    }

    /// Single-row convenience over [`PredictionGateway::predict`].
    pub fn predict_one(&self, row: &FeatureRow) -> Result<f64, PredictionError> {
        let predictions = self.predict(std::slice::from_ref(row))?;
        predictions.first().copied().ok_or(PredictionError::OutputLength {
            expected: 1,
            got: 0,
        })
    }
}
