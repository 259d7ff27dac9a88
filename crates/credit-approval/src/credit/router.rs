use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;

use super::domain::{ApplicantInput, Decision};
use super::features::FeatureVector;
use super::form::{credit_form, FormField};
use super::model::ModelGateway;
use super::panel::DecisionPanel;
use super::service::{CreditDecisionService, DecisionError};

#[derive(Debug, Serialize)]
pub(crate) struct DecisionResponse {
    pub(crate) decision: Decision,
    pub(crate) panel: DecisionPanel,
    pub(crate) features: FeatureVector,
    pub(crate) model_output: i64,
    pub(crate) decided_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DecisionErrorResponse {
    pub(crate) error: &'static str,
    pub(crate) panel: DecisionPanel,
}

/// Router exposing the application form and the decision endpoint.
pub fn credit_router<G>(service: Arc<CreditDecisionService<G>>) -> Router
where
    G: ModelGateway + 'static,
{
    Router::new()
        .route("/api/v1/credit/form", get(form_handler))
        .route("/api/v1/credit/decisions", post(decide_handler::<G>))
        .with_state(service)
}

pub(crate) async fn form_handler() -> Json<Vec<FormField>> {
    Json(credit_form())
}

pub(crate) async fn decide_handler<G>(
    State(service): State<Arc<CreditDecisionService<G>>>,
    Json(input): Json<ApplicantInput>,
) -> Response
where
    G: ModelGateway + 'static,
{
    match service.assess(&input) {
        Ok(assessment) => {
            let body = DecisionResponse {
                decision: assessment.decision,
                panel: DecisionPanel::decision(assessment.decision),
                features: assessment.features,
                model_output: assessment.model_output,
                decided_at: Utc::now(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => {
            let (status, code) = match &err {
                DecisionError::ModelLoad(_) => (StatusCode::SERVICE_UNAVAILABLE, "model_unavailable"),
                DecisionError::Prediction(_) => {
                    error!(error = %err, "credit prediction failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, "prediction_failed")
                }
                DecisionError::InvalidInput(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_input"),
            };
            let body = DecisionErrorResponse {
                error: code,
                panel: DecisionPanel::error(&err),
            };
            (status, Json(body)).into_response()
        }
    }
}
