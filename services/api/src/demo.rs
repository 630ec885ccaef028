use crate::cli::{ArtifactArgs, PredictionMode};
use crate::infra::{load_service, model_config};
use clap::Args;
use emi_predict::error::AppError;
use emi_predict::workflows::emi::batch::write_outcomes;
use emi_predict::workflows::emi::insights::ExpenseBreakdown;
use emi_predict::workflows::emi::{
    BorrowerBatch, BorrowerInput, EligibilityResponse, EmiPredictionService, EstimateResponse,
};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// Which prediction to run
    #[arg(value_enum)]
    pub(crate) mode: PredictionMode,
    /// JSON file with the borrower fields. Form defaults are used when omitted.
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) artifacts: ArtifactArgs,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export whose headers are the borrower field names
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Where to write the scored CSV (stdout when omitted)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "eligibility")]
    pub(crate) mode: PredictionMode,
    #[command(flatten)]
    pub(crate) artifacts: ArtifactArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    #[command(flatten)]
    pub(crate) artifacts: ArtifactArgs,
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let PredictArgs {
        mode,
        input,
        artifacts,
    } = args;

    let service = load_service(&model_config(artifacts)?)?;
    let input = match input {
        Some(path) => read_borrower(path)?,
        None => BorrowerInput::default(),
    };

    let rendered = match mode {
        PredictionMode::Eligibility => serde_json::to_string_pretty(&EligibilityResponse::from(
            service.assess_eligibility(&input)?,
        ))?,
        PredictionMode::Estimate => serde_json::to_string_pretty(&EstimateResponse::from(
            service.estimate_max_emi(&input)?,
        ))?,
    };
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let BatchArgs {
        input,
        output,
        mode,
        artifacts,
    } = args;

    let service = load_service(&model_config(artifacts)?)?;
    let batch = BorrowerBatch::from_path(&input)?;
    let outcomes = service.score_batch(&batch, mode.into());
    let failed = outcomes.iter().filter(|outcome| outcome.is_error()).count();

    match output {
        Some(path) => {
            write_outcomes(File::create(&path)?, &outcomes)?;
            println!(
                "Scored {} borrowers from {} ({} failed) -> {}",
                outcomes.len(),
                input.display(),
                failed,
                path.display()
            );
        }
        None => write_outcomes(io::stdout().lock(), &outcomes)?,
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = load_service(&model_config(args.artifacts)?)?;
    let input = BorrowerInput::default();

    println!("EMI prediction demo (form defaults)");
    println!(
        "- {} year old, {} employee, monthly salary INR {}",
        input.age, input.employment_type, input.monthly_salary
    );

    render_eligibility(&service, &input)?;
    render_estimate(&service, &input)?;
    Ok(())
}

fn read_borrower(path: PathBuf) -> Result<BorrowerInput, AppError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn render_eligibility(
    service: &EmiPredictionService,
    input: &BorrowerInput,
) -> Result<(), AppError> {
    let assessment = service.assess_eligibility(input)?;
    let insights = assessment.insights();

    println!("\nEligibility");
    println!("- Prediction: {}", assessment.label);
    println!("- Risk score: {:.3}", assessment.risk_score());
    println!(
        "- Credit score {:.0} on a {:.0}-{:.0} gauge ({} band)",
        insights.credit_score.value,
        insights.credit_score.min,
        insights.credit_score.max,
        insights.credit_score.band.label()
    );
    render_expenses(&insights.expenses);
    Ok(())
}

fn render_estimate(
    service: &EmiPredictionService,
    input: &BorrowerInput,
) -> Result<(), AppError> {
    let estimate = service.estimate_max_emi(input)?;
    let insights = estimate.insights();

    println!("\nMaximum EMI");
    println!("- Estimated maximum EMI: INR {:.2}", estimate.amount);
    println!(
        "- Salary INR {:.0} vs predicted EMI INR {:.0}",
        insights.salary_comparison.monthly_salary, insights.salary_comparison.predicted_emi
    );
    println!(
        "- Savings after EMI: {:.1}% ({} band)",
        insights.savings.percent,
        insights.savings.band.label()
    );
    render_expenses(&insights.expenses);
    Ok(())
}

fn render_expenses(breakdown: &ExpenseBreakdown) {
    println!("Expense breakdown (INR {:.0} total):", breakdown.total());
    for slice in &breakdown.slices {
        println!("  - {}: {:.0}", slice.label, slice.amount);
    }
}
