use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::LogisticRegression;
use smartcore::tree::decision_tree_classifier::DecisionTreeClassifier;

use super::{Classifier, PredictionError};
use crate::credit::features::{FeatureVector, FEATURE_COUNT};

pub type LogisticModel = LogisticRegression<f64, i64, DenseMatrix<f64>, Vec<i64>>;
pub type TreeModel = DecisionTreeClassifier<f64, i64, DenseMatrix<f64>, Vec<i64>>;

/// Serialized estimator exported from the offline training job.
#[derive(Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Width of the training matrix.
    pub n_features: usize,
    pub estimator: Estimator,
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", content = "model", rename_all = "snake_case")]
pub enum Estimator {
    LogisticRegression(LogisticModel),
    DecisionTree(TreeModel),
}

impl ModelArtifact {
    pub fn new(estimator: Estimator) -> Self {
        Self {
            n_features: FEATURE_COUNT,
            estimator,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self.estimator {
            Estimator::LogisticRegression(_) => "logistic_regression",
            Estimator::DecisionTree(_) => "decision_tree",
        }
    }

    /// Shape checks that would otherwise surface as wrong answers at predict time.
    pub fn check_compatibility(&self) -> Result<(), String> {
        if self.n_features != FEATURE_COUNT {
            return Err(format!(
                "expected {FEATURE_COUNT} features, artifact declares {}",
                self.n_features
            ));
        }
        if let Estimator::LogisticRegression(model) = &self.estimator {
            let (_, width) = model.coefficients().shape();
            if width != FEATURE_COUNT {
                return Err(format!(
                    "expected {FEATURE_COUNT} coefficients per class, found {width}"
                ));
            }
        }
        Ok(())
    }
}

impl Classifier for ModelArtifact {
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<i64>, PredictionError> {
        let matrix = to_matrix(rows)?;
        let outputs = match &self.estimator {
            Estimator::LogisticRegression(model) => model.predict(&matrix),
            Estimator::DecisionTree(model) => model.predict(&matrix),
        };
        outputs.map_err(|err| PredictionError::Internal(err.to_string()))
    }
}

fn to_matrix(rows: &[FeatureVector]) -> Result<DenseMatrix<f64>, PredictionError> {
    let mut values = Vec::with_capacity(rows.len());
    for row in rows {
        if let Some((feature, _)) = row.iter().find(|(_, value)| !value.is_finite()) {
            return Err(PredictionError::NonFiniteFeature(feature));
        }
        values.push(row.as_array().to_vec());
    }
    DenseMatrix::from_2d_vec(&values).map_err(|err| PredictionError::Internal(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credit::features::Feature;
    use smartcore::linear::logistic_regression::LogisticRegressionParameters;
    use smartcore::tree::decision_tree_classifier::DecisionTreeClassifierParameters;

    /// Rows where only credit history separates the labels.
    fn training_rows() -> Vec<Vec<f64>> {
        vec![
            vec![10000.0, 5000.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            vec![12000.0, 3000.0, 1.0, 1.0, 1.0, 1.0, 500.0],
            vec![8000.0, 7000.0, 0.0, 1.0, 1.0, 0.0, 1500.0],
            vec![10000.0, 5000.0, 1.0, 0.0, 0.0, 1.0, 0.0],
            vec![12000.0, 3000.0, 0.0, 1.0, 0.0, 0.0, 500.0],
            vec![8000.0, 7000.0, 1.0, 0.0, 0.0, 1.0, 1500.0],
        ]
    }

    fn credit_history_tree(approve: i64, deny: i64) -> ModelArtifact {
        let rows = training_rows();
        let labels: Vec<i64> = rows
            .iter()
            .map(|row| if row[Feature::CreditHistory.column()] > 0.5 { approve } else { deny })
            .collect();
        let x = DenseMatrix::from_2d_vec(&rows).expect("training matrix");
        let model = DecisionTreeClassifier::fit(&x, &labels, DecisionTreeClassifierParameters::default())
            .expect("tree fits");
        ModelArtifact::new(Estimator::DecisionTree(model))
    }

    fn row(credit_history: f64) -> FeatureVector {
        FeatureVector::new([10000.0, 5000.0, 0.0, 0.0, credit_history, 0.0, 0.0])
    }

    #[test]
    fn fitted_tree_round_trips_through_json() {
        let json = serde_json::to_string(&credit_history_tree(1, 0)).expect("serializes");
        let artifact: ModelArtifact = serde_json::from_str(&json).expect("artifact parses");

        assert_eq!(artifact.kind(), "decision_tree");
        assert!(artifact.check_compatibility().is_ok());
        assert_eq!(
            artifact.predict(&[row(1.0), row(0.0)]).expect("prediction succeeds"),
            vec![1, 0]
        );
    }

    #[test]
    fn class_labels_pass_through_unchanged() {
        let tree = credit_history_tree(2, -1);
        assert_eq!(tree.predict(&[row(1.0), row(0.0)]).expect("predicts"), vec![2, -1]);
    }

    #[test]
    fn logistic_regression_scores_binary_labels() {
        let rows = training_rows();
        let labels: Vec<i64> = vec![1, 1, 1, 0, 0, 0];
        let x = DenseMatrix::from_2d_vec(&rows).expect("training matrix");
        let model = LogisticRegression::fit(&x, &labels, LogisticRegressionParameters::default())
            .expect("logistic regression fits");
        let artifact = ModelArtifact::new(Estimator::LogisticRegression(model));

        assert!(artifact.check_compatibility().is_ok());
        let outputs = artifact.predict(&[row(1.0)]).expect("predicts");
        assert_eq!(outputs.len(), 1);
        assert!(matches!(outputs[0], 0 | 1));
    }

    #[test]
    fn rejects_narrow_logistic_regression() {
        let rows: Vec<Vec<f64>> = training_rows()
            .into_iter()
            .map(|row| row[..5].to_vec())
            .collect();
        let labels: Vec<i64> = vec![1, 1, 1, 0, 0, 0];
        let x = DenseMatrix::from_2d_vec(&rows).expect("training matrix");
        let model = LogisticRegression::fit(&x, &labels, LogisticRegressionParameters::default())
            .expect("logistic regression fits");
        let artifact = ModelArtifact::new(Estimator::LogisticRegression(model));

        let err = artifact.check_compatibility().expect_err("narrow model rejected");
        assert!(err.contains("found 5"));
    }

    #[test]
    fn rejects_declared_width_mismatch() {
        let mut artifact = credit_history_tree(1, 0);
        artifact.n_features = 6;
        let err = artifact.check_compatibility().expect_err("width mismatch rejected");
        assert!(err.contains("declares 6"));
    }

    #[test]
    fn non_finite_rows_are_rejected() {
        let tree = credit_history_tree(1, 0);
        let row = FeatureVector::new([f64::NAN, 5000.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        assert!(matches!(
            tree.predict(&[row]),
            Err(PredictionError::NonFiniteFeature(Feature::LoanAmount))
        ));
    }
}
