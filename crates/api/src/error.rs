//! API error types with HTTP response mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use model_gateway::GatewayError;

/// Message returned for scoring faults whose details stay in the logs.
pub const SCORING_FAILED: &str = "Risk scoring failed";

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// The request body did not match the expected shape.
    InvalidInput { status: StatusCode, message: String },
    /// Model gateway error.
    Gateway(GatewayError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidInput { status, message } => {
                tracing::debug!(%status, error = %message, "rejected request body");
                (status, message)
            }
            ApiError::Gateway(err) => gateway_error_to_response(err),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn gateway_error_to_response(err: GatewayError) -> (StatusCode, String) {
    metrics::counter!("risk_prediction_failures_total").increment(1);
    tracing::error!(error = %err, "risk prediction failed");
    match &err {
        GatewayError::ArtifactMissing { .. } | GatewayError::ArtifactInvalid { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        GatewayError::Io { .. } | GatewayError::Scoring(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            SCORING_FAILED.to_string(),
        ),
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        ApiError::Gateway(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match &rejection {
            JsonRejection::JsonDataError(_)
            | JsonRejection::JsonSyntaxError(_)
            | JsonRejection::MissingJsonContentType(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => rejection.status(),
        };
        ApiError::InvalidInput {
            status,
            message: rejection.body_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_missing_artifact_is_descriptive_server_error() {
        let err = GatewayError::ArtifactMissing {
            path: PathBuf::from("risk_model.json"),
        };
        let (status, message) = gateway_error_to_response(err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Model artifact missing: risk_model.json");
    }

    #[test]
    fn test_scoring_fault_hides_details() {
        let err = GatewayError::Scoring("scaled feature 0 is not finite".to_string());
        let (status, message) = gateway_error_to_response(err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, SCORING_FAILED);
    }

    #[test]
    fn test_invalid_input_keeps_status() {
        let response = ApiError::InvalidInput {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "missing field `bmi`".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
