//! Credit application intake: feature assembly, model-backed decisions, and the result panel.
//!
//! The classifier column order is fixed by training. [`features::Feature::ordered`] is the
//! only place that order is written down; every path to the model goes through
//! [`FeatureVector::assemble`].

pub mod domain;
pub mod features;
pub mod form;
pub mod model;
pub mod panel;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{ApplicantInput, Decision, InputError, YesNo};
pub use features::{Feature, FeatureVector, FEATURE_COUNT};
pub use form::{credit_form, FieldKind, FormField};
pub use model::{
    ArtifactGateway, Classifier, Estimator, GatewayError, ModelArtifact, ModelGateway,
    ModelLoadError, PredictionError,
};
pub use panel::{DecisionPanel, PanelTone};
pub use router::credit_router;
pub use service::{Assessment, CreditDecisionService, DecisionError};
