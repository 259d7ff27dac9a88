//! Model gateway: loads the trained classifier once and serves predictions from it.

mod artifact;
mod gateway;

pub use artifact::{Estimator, LogisticModel, ModelArtifact, TreeModel};
pub use gateway::ArtifactGateway;

use std::path::PathBuf;

use super::features::{Feature, FeatureVector};

/// Anything that can score rows of the fixed-order feature matrix.
pub trait Classifier: Send + Sync {
    /// Score each row, returning one class label per row.
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<i64>, PredictionError>;
}

/// Access point the decision service uses to reach the trained model.
pub trait ModelGateway: Send + Sync {
    /// Load the model if it has not been loaded yet; the first outcome is cached.
    fn ensure_loaded(&self) -> Result<(), ModelLoadError>;

    /// Run inference on a single assembled vector.
    fn predict(&self, vector: &FeatureVector) -> Result<i64, GatewayError>;
}

/// Failure to bring the classifier artifact into memory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelLoadError {
    #[error("model artifact not found at {}", path.display())]
    Missing { path: PathBuf },
    #[error("model artifact at {} could not be read: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },
    #[error("model artifact at {} is not a valid classifier: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
    #[error("model artifact at {} is incompatible: {reason}", path.display())]
    Incompatible { path: PathBuf, reason: String },
}

/// Failure raised while the loaded classifier is scoring a row.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error("feature {} is not a finite number", .0.key())]
    NonFiniteFeature(Feature),
    #[error("classifier returned no output")]
    EmptyOutput,
    #[error("classifier failed: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    NotLoaded(#[from] ModelLoadError),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
}
