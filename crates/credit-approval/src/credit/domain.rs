use serde::{Deserialize, Serialize};

use super::features::Feature;

pub const DEFAULT_APPLICANT_INCOME: f64 = 5000.0;
pub const DEFAULT_LOAN_AMOUNT: f64 = 10000.0;
pub const MINIMUM_LOAN_AMOUNT: f64 = 100.0;

/// Binary form answer, decoupled from the canonical value the model consumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNo {
    #[serde(alias = "yes", alias = "YES")]
    Yes,
    #[default]
    #[serde(alias = "no", alias = "NO")]
    No,
}

impl YesNo {
    pub const fn ordered() -> [Self; 2] {
        [Self::No, Self::Yes]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }

    /// Canonical model encoding: `Yes` is 1, `No` is 0.
    pub const fn canonical(self) -> u8 {
        match self {
            Self::Yes => 1,
            Self::No => 0,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "1" | "true" => Ok(Self::Yes),
            "no" | "n" | "0" | "false" => Ok(Self::No),
            other => Err(format!("expected yes or no, got '{other}'")),
        }
    }
}

/// Applicant fields captured by a single form submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApplicantInput {
    #[serde(default = "default_applicant_income")]
    pub applicant_income: f64,
    #[serde(default = "default_loan_amount")]
    pub loan_amount: f64,
    #[serde(default)]
    pub coapplicant_income: f64,
    #[serde(default)]
    pub married: YesNo,
    #[serde(default)]
    pub dependents: YesNo,
    #[serde(default)]
    pub self_employed: YesNo,
    #[serde(default)]
    pub credit_history: YesNo,
}

fn default_applicant_income() -> f64 {
    DEFAULT_APPLICANT_INCOME
}

fn default_loan_amount() -> f64 {
    DEFAULT_LOAN_AMOUNT
}

impl Default for ApplicantInput {
    fn default() -> Self {
        Self {
            applicant_income: DEFAULT_APPLICANT_INCOME,
            loan_amount: DEFAULT_LOAN_AMOUNT,
            coapplicant_income: 0.0,
            married: YesNo::No,
            dependents: YesNo::No,
            self_employed: YesNo::No,
            credit_history: YesNo::No,
        }
    }
}

impl ApplicantInput {
    /// Enforce the numeric bounds the form advertises.
    pub fn validate(&self) -> Result<(), InputError> {
        let bounds = [
            (Feature::ApplicantIncome, self.applicant_income, 0.0),
            (Feature::LoanAmount, self.loan_amount, MINIMUM_LOAN_AMOUNT),
            (Feature::CoapplicantIncome, self.coapplicant_income, 0.0),
        ];

        for (field, value, minimum) in bounds {
            if !value.is_finite() {
                return Err(InputError::NotFinite { field });
            }
            if value < minimum {
                return Err(InputError::BelowMinimum {
                    field,
                    minimum,
                    value,
                });
            }
        }

        Ok(())
    }
}

/// Rejected numeric field on an otherwise well-formed submission.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{} must be a finite number", field.label())]
    NotFinite { field: Feature },
    #[error("{} must be at least {minimum} (got {value})", field.label())]
    BelowMinimum {
        field: Feature,
        minimum: f64,
        value: f64,
    },
}

/// Outcome rendered to the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approved,
    Denied,
}

impl Decision {
    /// Only an output of exactly 1 approves; everything else is a denial.
    pub const fn from_model_output(output: i64) -> Self {
        if output == 1 {
            Self::Approved
        } else {
            Self::Denied
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Denied => "denied",
        }
    }
}
