use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::domain::ApplicantInput;

pub const FEATURE_COUNT: usize = 7;

/// Model input columns. `ordered()` is the column order the classifier was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    LoanAmount,
    ApplicantIncome,
    Dependents,
    SelfEmployed,
    CreditHistory,
    Married,
    CoapplicantIncome,
}

impl Feature {
    pub const fn ordered() -> [Self; FEATURE_COUNT] {
        [
            Self::LoanAmount,
            Self::ApplicantIncome,
            Self::Dependents,
            Self::SelfEmployed,
            Self::CreditHistory,
            Self::Married,
            Self::CoapplicantIncome,
        ]
    }

    pub const fn column(self) -> usize {
        match self {
            Self::LoanAmount => 0,
            Self::ApplicantIncome => 1,
            Self::Dependents => 2,
            Self::SelfEmployed => 3,
            Self::CreditHistory => 4,
            Self::Married => 5,
            Self::CoapplicantIncome => 6,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::LoanAmount => "loan_amount",
            Self::ApplicantIncome => "applicant_income",
            Self::Dependents => "dependents",
            Self::SelfEmployed => "self_employed",
            Self::CreditHistory => "credit_history",
            Self::Married => "married",
            Self::CoapplicantIncome => "coapplicant_income",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LoanAmount => "Loan Amount",
            Self::ApplicantIncome => "Applicant Income",
            Self::Dependents => "Has Dependents",
            Self::SelfEmployed => "Self-Employed",
            Self::CreditHistory => "Good Credit History",
            Self::Married => "Married",
            Self::CoapplicantIncome => "Co-applicant Income",
        }
    }

    fn value_from(self, input: &ApplicantInput) -> f64 {
        match self {
            Self::LoanAmount => input.loan_amount,
            Self::ApplicantIncome => input.applicant_income,
            Self::Dependents => f64::from(input.dependents.canonical()),
            Self::SelfEmployed => f64::from(input.self_employed.canonical()),
            Self::CreditHistory => f64::from(input.credit_history.canonical()),
            Self::Married => f64::from(input.married.canonical()),
            Self::CoapplicantIncome => input.coapplicant_income,
        }
    }
}

/// Fixed-order row handed to the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub const fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// Project an applicant onto the training column order.
    pub fn assemble(input: &ApplicantInput) -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        for feature in Feature::ordered() {
            values[feature.column()] = feature.value_from(input);
        }
        Self(values)
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.column()]
    }

    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ordered()
            .into_iter()
            .map(move |feature| (feature, self.get(feature)))
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (feature, value) in self.iter() {
            map.serialize_entry(feature.key(), &value)?;
        }
        map.end()
    }
}
