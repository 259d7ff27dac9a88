use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::domain::{ApplicantInput, Decision, InputError};
use super::features::FeatureVector;
use super::model::{GatewayError, ModelGateway, ModelLoadError, PredictionError};

/// Maps applicant submissions to decisions through an injected model gateway.
pub struct CreditDecisionService<G> {
    gateway: Arc<G>,
}

impl<G> Clone for CreditDecisionService<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
        }
    }
}

/// Decision together with the evidence that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub decision: Decision,
    pub features: FeatureVector,
    pub model_output: i64,
}

impl<G> CreditDecisionService<G>
where
    G: ModelGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Approve or deny a single submission.
    pub fn decide(&self, input: &ApplicantInput) -> Result<Decision, DecisionError> {
        self.assess(input).map(|assessment| assessment.decision)
    }

    /// Like [`decide`](Self::decide) but keeps the feature vector and raw model output.
    pub fn assess(&self, input: &ApplicantInput) -> Result<Assessment, DecisionError> {
        self.gateway.ensure_loaded()?;
        input.validate()?;

        let features = FeatureVector::assemble(input);
        let model_output = self.gateway.predict(&features)?;
        let decision = Decision::from_model_output(model_output);

        if !matches!(model_output, 0 | 1) {
            warn!(model_output, "unexpected classifier output treated as denial");
        }
        info!(decision = decision.label(), model_output, "credit decision rendered");

        Ok(Assessment {
            decision,
            features,
            model_output,
        })
    }
}

/// Error raised when a submission cannot be turned into a decision.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecisionError {
    #[error("model unavailable: {0}")]
    ModelLoad(#[from] ModelLoadError),
    #[error("prediction failed: {0}")]
    Prediction(#[from] PredictionError),
    #[error(transparent)]
    InvalidInput(#[from] InputError),
}

impl From<GatewayError> for DecisionError {
    fn from(value: GatewayError) -> Self {
        match value {
            GatewayError::NotLoaded(err) => Self::ModelLoad(err),
            GatewayError::Prediction(err) => Self::Prediction(err),
        }
    }
}
