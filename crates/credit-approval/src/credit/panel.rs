use serde::Serialize;

use super::domain::Decision;
use super::service::DecisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelTone {
    Approved,
    Denied,
    Error,
}

/// The single result block shown after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionPanel {
    pub tone: PanelTone,
    pub headline: String,
    pub message: String,
}

impl DecisionPanel {
    pub fn render(result: &Result<Decision, DecisionError>) -> Self {
        match result {
            Ok(decision) => Self::decision(*decision),
            Err(err) => Self::error(err),
        }
    }

    pub fn decision(decision: Decision) -> Self {
        match decision {
            Decision::Approved => Self::new(
                PanelTone::Approved,
                "Credit Approved",
                "This application meets our credit criteria.",
            ),
            Decision::Denied => Self::new(
                PanelTone::Denied,
                "Credit Denied",
                "This application does not meet our current lending standards.",
            ),
        }
    }

    /// Internal details stay in the logs; the panel only names the failure class.
    pub fn error(err: &DecisionError) -> Self {
        match err {
            DecisionError::ModelLoad(_) => Self::new(
                PanelTone::Error,
                "Prediction Unavailable",
                "The credit model could not be loaded; predictions are disabled.",
            ),
            DecisionError::Prediction(_) => Self::new(
                PanelTone::Error,
                "Something Went Wrong",
                "An error occurred while analyzing the application.",
            ),
            DecisionError::InvalidInput(input) => {
                Self::new(PanelTone::Error, "Invalid Application", &input.to_string())
            }
        }
    }

    fn new(tone: PanelTone, headline: &str, message: &str) -> Self {
        Self {
            tone,
            headline: headline.to_string(),
            message: message.to_string(),
        }
    }
}
