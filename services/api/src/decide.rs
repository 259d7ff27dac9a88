use clap::Args;
use credit_approval::config::AppConfig;
use credit_approval::credit::{
    ApplicantInput, ArtifactGateway, CreditDecisionService, DecisionPanel, YesNo,
};
use credit_approval::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DecideArgs {
    /// Gross monthly income of the primary applicant (USD)
    #[arg(long, default_value_t = 5000.0)]
    pub(crate) applicant_income: f64,
    /// Total amount of credit requested (USD, at least 100)
    #[arg(long, default_value_t = 10000.0)]
    pub(crate) loan_amount: f64,
    /// Gross monthly income of the co-applicant (USD)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) coapplicant_income: f64,
    /// Whether the applicant is married (yes/no)
    #[arg(long, value_parser = YesNo::parse, default_value = "no")]
    pub(crate) married: YesNo,
    /// Whether the applicant has financial dependents (yes/no)
    #[arg(long, value_parser = YesNo::parse, default_value = "no")]
    pub(crate) dependents: YesNo,
    /// Whether the applicant is self-employed (yes/no)
    #[arg(long, value_parser = YesNo::parse, default_value = "no")]
    pub(crate) self_employed: YesNo,
    /// Whether the applicant has a good credit history (yes/no)
    #[arg(long, value_parser = YesNo::parse, default_value = "no")]
    pub(crate) credit_history: YesNo,
    /// Override the configured model artifact path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

impl DecideArgs {
    fn applicant(&self) -> ApplicantInput {
        ApplicantInput {
            applicant_income: self.applicant_income,
            loan_amount: self.loan_amount,
            coapplicant_income: self.coapplicant_income,
            married: self.married,
            dependents: self.dependents,
            self_employed: self.self_employed,
            credit_history: self.credit_history,
        }
    }
}

pub(crate) fn run_decide(args: DecideArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(model) = args.model.clone() {
        config.model.artifact_path = model;
    }

    // Stdout carries only the panel; no subscriber is installed for this command.
    let gateway = Arc::new(ArtifactGateway::new(config.model.artifact_path));
    let service = CreditDecisionService::new(gateway);

    let result = service.decide(&args.applicant());
    render_panel(&DecisionPanel::render(&result));

    result.map(|_| ()).map_err(AppError::from)
}

fn render_panel(panel: &DecisionPanel) {
    println!("{}", panel.headline);
    println!("{}", panel.message);
}
