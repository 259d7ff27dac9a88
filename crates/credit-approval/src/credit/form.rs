use serde::Serialize;

use super::domain::{YesNo, DEFAULT_APPLICANT_INCOME, DEFAULT_LOAN_AMOUNT, MINIMUM_LOAN_AMOUNT};
use super::features::Feature;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Number { minimum: f64, default: f64 },
    YesNo { options: [&'static str; 2], default: YesNo },
}

/// One input of the application form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// Fields in the order the form presents them, which differs from the model column order.
pub fn credit_form() -> Vec<FormField> {
    vec![
        number(Feature::ApplicantIncome, "Applicant Income (USD)", 0.0, DEFAULT_APPLICANT_INCOME),
        number(
            Feature::LoanAmount,
            "Loan Amount (USD)",
            MINIMUM_LOAN_AMOUNT,
            DEFAULT_LOAN_AMOUNT,
        ),
        yes_no(Feature::Married, "Married?"),
        yes_no(Feature::Dependents, "Has Dependents?"),
        number(Feature::CoapplicantIncome, "Co-applicant Income (USD)", 0.0, 0.0),
        yes_no(Feature::SelfEmployed, "Self-Employed?"),
        yes_no(Feature::CreditHistory, "Good Credit History?"),
    ]
}

fn number(feature: Feature, label: &'static str, minimum: f64, default: f64) -> FormField {
    FormField {
        key: feature.key(),
        label,
        kind: FieldKind::Number { minimum, default },
    }
}

fn yes_no(feature: Feature, label: &'static str) -> FormField {
    FormField {
        key: feature.key(),
        label,
        kind: FieldKind::YesNo {
            options: YesNo::ordered().map(YesNo::label),
            default: YesNo::No,
        },
    }
}
