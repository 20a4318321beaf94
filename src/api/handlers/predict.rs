//! Premium prediction endpoint

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::api::envelope::ApiErrorResponse;
use crate::features;
use crate::model::PredictionError;
use crate::types::PredictRequest;

use super::ServiceState;

/// Successful prediction body
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PredictionResponse {
    pub predicted_premium: f64,
}

/// POST /predict - Validate, derive features, run the model.
///
/// 422 on a field violation, 500 when the model rejects the feature row,
/// 503 when no model is loaded. Bodies that do not decode keep the
/// extractor's status.
pub async fn predict_premium(
    State(state): State<ServiceState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    if !state.gateway.model_loaded() {
        return ApiErrorResponse::model_unavailable("model is not loaded; predictions are unavailable");
    }

    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Malformed prediction request");
            return ApiErrorResponse::malformed(rejection.status(), rejection.body_text());
        }
    };

    let features = match features::prepare(&request, &state.tiers) {
        Ok(f) => f,
        Err(e) => {
            warn!(field = e.field(), error = %e, "Prediction request failed validation");
            return ApiErrorResponse::validation(e.field(), e.to_string());
        }
    };

    debug!(
        bmi = features.bmi,
        age_group = %features.age_group,
        lifestyle_risk = %features.lifestyle_risk,
        city_tier = %features.city_tier,
        income_lpa = features.income_lpa,
        occupation = %features.occupation,
        "Derived features"
    );

    match state.gateway.predict_one(&features.to_row()) {
        Ok(premium) => {
            info!(premium, model_version = state.gateway.model_version(), "Premium predicted");
            (StatusCode::OK, Json(PredictionResponse { predicted_premium: premium })).into_response()
        }
        Err(PredictionError::ModelNotLoaded) => {
            ApiErrorResponse::model_unavailable(PredictionError::ModelNotLoaded.to_string())
        }
        Err(e) => ApiErrorResponse::prediction(e.to_string()),
    }
}
