//! Risk prediction endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use common::{RiskAssessment, Vitals};
use model_gateway::ModelGateway;

use crate::error::ApiError;
use crate::notify::{self, AlertNotifier, AshaAlert};

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub gateway: Arc<ModelGateway>,
    pub notifier: Arc<dyn AlertNotifier>,
}

/// POST /predict_risk — score vitals and return the risk band.
///
/// Body-shape failures are answered before the gateway is consulted.
/// High-risk results also raise an ASHA alert in the background.
#[tracing::instrument(skip(state, payload))]
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Vitals>, JsonRejection>,
) -> Result<Json<RiskAssessment>, ApiError> {
    let Json(vitals) = payload?;

    let probability = state.gateway.score(&vitals).await?;
    let assessment = RiskAssessment::from_probability(probability);

    metrics::counter!(
        "risk_predictions_total",
        "category" => assessment.risk_category.label()
    )
    .increment(1);
    tracing::debug!(
        category = %assessment.risk_category,
        probability = assessment.probability,
        "risk predicted"
    );

    if assessment.is_high_risk() {
        notify::dispatch(state.notifier.clone(), AshaAlert::new(vitals, &assessment));
    }

    Ok(Json(assessment))
}
