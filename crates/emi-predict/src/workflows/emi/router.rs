use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use super::domain::BorrowerInput;
use super::engineering::EngineeredRecord;
use super::form::{form_fields, FormField};
use super::inference::EligibilityLabel;
use super::insights::{EligibilityInsights, EstimationInsights};
use super::service::{EligibilityAssessment, EmiEstimate, EmiPredictionService, PredictionError};

#[derive(Debug, Serialize)]
pub struct EligibilityResponse {
    pub label: EligibilityLabel,
    pub risk_score: f64,
    pub engineered: EngineeredRecord,
    pub insights: EligibilityInsights,
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub amount: f64,
    pub savings_ratio: f64,
    pub engineered: EngineeredRecord,
    pub insights: EstimationInsights,
}

impl From<EligibilityAssessment> for EligibilityResponse {
    fn from(assessment: EligibilityAssessment) -> Self {
        Self {
            label: assessment.label,
            risk_score: assessment.risk_score(),
            insights: assessment.insights(),
            engineered: assessment.engineered,
        }
    }
}

impl From<EmiEstimate> for EstimateResponse {
    fn from(estimate: EmiEstimate) -> Self {
        Self {
            amount: estimate.amount,
            savings_ratio: estimate.savings_ratio(),
            insights: estimate.insights(),
            engineered: estimate.engineered,
        }
    }
}

/// Router builder exposing the eligibility and estimation endpoints.
pub fn prediction_router(service: Arc<EmiPredictionService>) -> Router {
    Router::new()
        .route("/api/v1/emi/eligibility", post(eligibility_handler))
        .route("/api/v1/emi/estimate", post(estimate_handler))
        .route("/api/v1/emi/form", get(form_handler))
        .with_state(service)
}

pub(crate) async fn eligibility_handler(
    State(service): State<Arc<EmiPredictionService>>,
    Json(input): Json<BorrowerInput>,
) -> Response {
    match service.assess_eligibility(&input) {
        Ok(assessment) => {
            (StatusCode::OK, Json(EligibilityResponse::from(assessment))).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn estimate_handler(
    State(service): State<Arc<EmiPredictionService>>,
    Json(input): Json<BorrowerInput>,
) -> Response {
    match service.estimate_max_emi(&input) {
        Ok(estimate) => (StatusCode::OK, Json(EstimateResponse::from(estimate))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn form_handler() -> Json<&'static [FormField]> {
    Json(form_fields())
}

fn error_response(err: PredictionError) -> Response {
    let status = match err {
        PredictionError::Configuration(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PredictionError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
