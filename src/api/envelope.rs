//! Error envelope for API responses.
//!
//! Every error is `{ "error": { "code", "message", "field"? }, "meta": { ... } }`
//! so clients can branch on `code` regardless of status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Serialize;

/// Metadata included in every error response.
#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub timestamp: String,
}

impl Default for ResponseMeta {
    fn default() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error detail inside [`ApiErrorResponse`].
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    /// Offending request field, for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ErrorDetail,
    pub meta: ResponseMeta,
}

impl ApiErrorResponse {
    pub fn build(
        status: StatusCode,
        code: &str,
        msg: impl Into<String>,
        field: Option<&str>,
    ) -> Response {
        let body = Self {
            error: ErrorDetail {
                code: code.to_string(),
                message: msg.into(),
                field: field.map(str::to_string),
            },
            meta: ResponseMeta::default(),
        };
        (status, axum::Json(body)).into_response()
    }

    /// 422: a request field violated its constraint.
    pub fn validation(field: &str, msg: impl Into<String>) -> Response {
        Self::build(StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR", msg, Some(field))
    }

    /// 500: the model rejected a validated feature row.
    pub fn prediction(msg: impl Into<String>) -> Response {
        Self::build(StatusCode::INTERNAL_SERVER_ERROR, "PREDICTION_ERROR", msg, None)
    }

    pub fn model_unavailable(msg: impl Into<String>) -> Response {
        Self::build(StatusCode::SERVICE_UNAVAILABLE, "MODEL_UNAVAILABLE", msg, None)
    }

    /// Body could not be decoded; keeps the extractor's status code.
    pub fn malformed(status: StatusCode, msg: impl Into<String>) -> Response {
        Self::build(status, "MALFORMED_REQUEST", msg, None)
    }
}
