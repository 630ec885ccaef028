use crate::demo::{run_batch, run_demo, run_predict, BatchArgs, DemoArgs, PredictArgs};
use crate::server;
use clap::{Args, Parser, Subcommand, ValueEnum};
use emi_predict::error::AppError;
use emi_predict::workflows::emi::BatchMode;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "EMI Predict",
    about = "Assess EMI eligibility and estimate affordable EMI from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a single borrower read from a JSON file
    Predict(PredictArgs),
    /// Score every row of a borrower CSV export
    Batch(BatchArgs),
    /// Run the form defaults through both prediction paths
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) artifacts: ArtifactArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ArtifactArgs {
    /// Directory holding the four model artifacts (overrides EMI_ARTIFACT_DIR).
    /// Per-file EMI_* overrides still apply on top of it.
    #[arg(long)]
    pub(crate) artifact_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PredictionMode {
    /// Classify as Eligible, High Risk or Not Eligible
    Eligibility,
    /// Estimate the maximum affordable EMI
    Estimate,
}

impl From<PredictionMode> for BatchMode {
    fn from(mode: PredictionMode) -> Self {
        match mode {
            PredictionMode::Eligibility => BatchMode::Eligibility,
            PredictionMode::Estimate => BatchMode::Estimation,
        }
    }
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Predict(args) => run_predict(args),
        Command::Batch(args) => run_batch(args),
        Command::Demo(args) => run_demo(args),
    }
}
