use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_classifier::{
    DecisionTreeClassifier, DecisionTreeClassifierParameters,
};

use crate::credit::domain::{ApplicantInput, YesNo};
use crate::credit::features::FeatureVector;
use crate::credit::model::{
    Classifier, Estimator, GatewayError, ModelArtifact, ModelGateway, ModelLoadError,
    PredictionError,
};
use crate::credit::service::CreditDecisionService;

/// Gateway double that records every vector it is asked to score.
pub(super) struct RecordingGateway {
    output: Result<i64, PredictionError>,
    seen: Mutex<Vec<FeatureVector>>,
}

impl RecordingGateway {
    pub(super) fn returning(output: i64) -> Self {
        Self {
            output: Ok(output),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn failing(err: PredictionError) -> Self {
        Self {
            output: Err(err),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn seen(&self) -> Vec<FeatureVector> {
        self.seen.lock().expect("gateway mutex poisoned").clone()
    }
}

impl ModelGateway for RecordingGateway {
    fn ensure_loaded(&self) -> Result<(), ModelLoadError> {
        Ok(())
    }

    fn predict(&self, vector: &FeatureVector) -> Result<i64, GatewayError> {
        self.seen
            .lock()
            .expect("gateway mutex poisoned")
            .push(*vector);
        self.output.clone().map_err(GatewayError::from)
    }
}

/// Gateway whose artifact never loaded; counts how often prediction was attempted.
pub(super) struct UnloadedGateway {
    pub(super) predict_calls: AtomicUsize,
}

impl UnloadedGateway {
    pub(super) fn new() -> Self {
        Self {
            predict_calls: AtomicUsize::new(0),
        }
    }

    fn error() -> ModelLoadError {
        ModelLoadError::Missing {
            path: PathBuf::from("./Model/model.json"),
        }
    }
}

impl ModelGateway for UnloadedGateway {
    fn ensure_loaded(&self) -> Result<(), ModelLoadError> {
        Err(Self::error())
    }

    fn predict(&self, _vector: &FeatureVector) -> Result<i64, GatewayError> {
        self.predict_calls.fetch_add(1, Ordering::Relaxed);
        Err(GatewayError::NotLoaded(Self::error()))
    }
}

/// Classifier returning a fixed label for every row.
pub(super) struct ConstantClassifier(pub(super) i64);

impl Classifier for ConstantClassifier {
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<i64>, PredictionError> {
        Ok(rows.iter().map(|_| self.0).collect())
    }
}

/// Classifier that produces no labels at all.
pub(super) struct SilentClassifier;

impl Classifier for SilentClassifier {
    fn predict(&self, _rows: &[FeatureVector]) -> Result<Vec<i64>, PredictionError> {
        Ok(Vec::new())
    }
}

pub(super) fn service_with<G>(gateway: G) -> (CreditDecisionService<G>, Arc<G>)
where
    G: ModelGateway + 'static,
{
    let gateway = Arc::new(gateway);
    (CreditDecisionService::new(gateway.clone()), gateway)
}

/// Default form values with good credit history.
pub(super) fn scenario_input() -> ApplicantInput {
    ApplicantInput {
        applicant_income: 5000.0,
        loan_amount: 10000.0,
        coapplicant_income: 0.0,
        married: YesNo::No,
        dependents: YesNo::No,
        self_employed: YesNo::No,
        credit_history: YesNo::Yes,
    }
}

pub(super) fn distinct_input() -> ApplicantInput {
    ApplicantInput {
        applicant_income: 4200.0,
        loan_amount: 15500.0,
        coapplicant_income: 1800.0,
        married: YesNo::Yes,
        dependents: YesNo::No,
        self_employed: YesNo::Yes,
        credit_history: YesNo::No,
    }
}

static ARTIFACT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Write an artifact to a unique temp path and return it.
pub(super) fn write_artifact(contents: &str) -> PathBuf {
    let id = ARTIFACT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!(
        "credit-approval-unit-{}-{id}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir created");
    let path = dir.join("model.json");
    std::fs::write(&path, contents).expect("artifact written");
    path
}

/// Fit a tree whose only useful split is credit history (1 approves, 0 denies).
pub(super) fn credit_history_tree() -> ModelArtifact {
    let rows = vec![
        vec![10000.0, 5000.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        vec![12000.0, 3000.0, 1.0, 1.0, 1.0, 1.0, 500.0],
        vec![8000.0, 7000.0, 0.0, 1.0, 1.0, 0.0, 1500.0],
        vec![10000.0, 5000.0, 1.0, 0.0, 0.0, 1.0, 0.0],
        vec![12000.0, 3000.0, 0.0, 1.0, 0.0, 0.0, 500.0],
        vec![8000.0, 7000.0, 1.0, 0.0, 0.0, 1.0, 1500.0],
    ];
    let labels: Vec<i64> = vec![1, 1, 1, 0, 0, 0];
    let x = DenseMatrix::from_2d_vec(&rows).expect("training matrix");
    let model = DecisionTreeClassifier::fit(&x, &labels, DecisionTreeClassifierParameters::default())
        .expect("tree fits");
    ModelArtifact::new(Estimator::DecisionTree(model))
}

pub(super) fn credit_history_tree_json() -> String {
    serde_json::to_string(&credit_history_tree()).expect("artifact serializes")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body readable");
    serde_json::from_slice(&body).expect("body is json")
}
