use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use tracing::{debug, error, info};

use super::artifact::ModelArtifact;
use super::{Classifier, GatewayError, ModelGateway, ModelLoadError, PredictionError};
use crate::credit::features::FeatureVector;

type LoadOutcome = Result<Arc<dyn Classifier>, ModelLoadError>;

/// File-backed gateway. The artifact is read at most once; success and failure are both cached.
pub struct ArtifactGateway {
    path: PathBuf,
    model: OnceLock<LoadOutcome>,
}

impl ArtifactGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            model: OnceLock::new(),
        }
    }

    /// Wrap a classifier that is already in memory.
    pub fn preloaded(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            path: PathBuf::from("<in-memory>"),
            model: OnceLock::from(Ok(classifier)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Arc<dyn Classifier>, ModelLoadError> {
        self.model
            .get_or_init(|| read_artifact(&self.path))
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.model.get(), Some(Ok(_)))
    }
}

impl fmt::Debug for ArtifactGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.model.get() {
            None => "pending",
            Some(Ok(_)) => "loaded",
            Some(Err(_)) => "failed",
        };
        f.debug_struct("ArtifactGateway")
            .field("path", &self.path)
            .field("state", &state)
            .finish()
    }
}

impl ModelGateway for ArtifactGateway {
    fn ensure_loaded(&self) -> Result<(), ModelLoadError> {
        self.load().map(|_| ())
    }

    fn predict(&self, vector: &FeatureVector) -> Result<i64, GatewayError> {
        let classifier = self.load()?;
        let outputs = classifier.predict(std::slice::from_ref(vector))?;
        let output = outputs
            .first()
            .copied()
            .ok_or(PredictionError::EmptyOutput)?;
        debug!(output, "classifier scored application");
        Ok(output)
    }
}

fn read_artifact(path: &Path) -> LoadOutcome {
    let outcome = parse_artifact(path);
    match &outcome {
        Ok(artifact) => info!(path = %path.display(), kind = artifact.kind(), "credit model loaded"),
        Err(err) => error!(error = %err, "credit model unavailable"),
    }
    outcome.map(|artifact| Arc::new(artifact) as Arc<dyn Classifier>)
}

fn parse_artifact(path: &Path) -> Result<ModelArtifact, ModelLoadError> {
    let bytes = std::fs::read(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => ModelLoadError::Missing {
            path: path.to_path_buf(),
        },
        _ => ModelLoadError::Unreadable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        },
    })?;

    let artifact: ModelArtifact =
        serde_json::from_slice(&bytes).map_err(|err| ModelLoadError::Malformed {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

    artifact
        .check_compatibility()
        .map_err(|reason| ModelLoadError::Incompatible {
            path: path.to_path_buf(),
            reason,
        })?;

    Ok(artifact)
}
