use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use super::artifacts::{ArtifactRegistry, InferenceError};
use super::batch::{BatchMode, BatchOutcome, BorrowerBatch};
use super::builder::build_profile;
use super::domain::{BorrowerInput, BorrowerProfile, ConfigurationError};
use super::engineering::{engineer, EngineeredRecord, FeatureVariant};
use super::inference::{self, EligibilityLabel};
use super::insights::{savings_ratio, EligibilityInsights, EstimationInsights};

/// Runs borrower input through feature building, engineering, alignment and inference.
///
/// Holds only the shared read-only artifacts; every call is independent.
#[derive(Debug, Clone)]
pub struct EmiPredictionService {
    registry: Arc<ArtifactRegistry>,
}

impl EmiPredictionService {
    pub fn new(registry: Arc<ArtifactRegistry>) -> Self {
        Self { registry }
    }

    /// Classify the borrower as eligible, high risk or not eligible.
    pub fn assess_eligibility(
        &self,
        input: &BorrowerInput,
    ) -> Result<EligibilityAssessment, PredictionError> {
        let profile = self.profile(input)?;
        let engineered = engineer(&profile, FeatureVariant::Eligibility);

        let label = inference::predict_eligibility(&self.registry, &engineered)
            .map_err(|err| inference_failed("eligibility", err))?;

        info!(
            label = label.label(),
            risk_score = engineered.risk_score().unwrap_or_default(),
            "eligibility assessed"
        );
        Ok(EligibilityAssessment { label, engineered })
    }

    /// Predict the largest EMI the borrower can carry.
    pub fn estimate_max_emi(&self, input: &BorrowerInput) -> Result<EmiEstimate, PredictionError> {
        let profile = self.profile(input)?;
        let engineered = engineer(&profile, FeatureVariant::Estimation);

        let amount = inference::estimate_max_emi(&self.registry, &engineered)
            .map_err(|err| inference_failed("estimation", err))?;

        info!(amount, "maximum EMI estimated");
        Ok(EmiEstimate { amount, engineered })
    }

    /// Scores every row independently; a failing row does not stop the rest.
    pub fn score_batch(&self, batch: &BorrowerBatch, mode: BatchMode) -> Vec<BatchOutcome> {
        batch
            .rows()
            .iter()
            .enumerate()
            .map(|(index, input)| {
                let mut outcome = BatchOutcome {
                    row: index + 1,
                    label: None,
                    risk_score: None,
                    amount: None,
                    error: None,
                };
                match mode {
                    BatchMode::Eligibility => match self.assess_eligibility(input) {
                        Ok(assessment) => {
                            outcome.risk_score = Some(assessment.risk_score());
                            outcome.label = Some(assessment.label);
                        }
                        Err(err) => outcome.error = Some(err.to_string()),
                    },
                    BatchMode::Estimation => match self.estimate_max_emi(input) {
                        Ok(estimate) => outcome.amount = Some(estimate.amount),
                        Err(err) => outcome.error = Some(err.to_string()),
                    },
                }
                outcome
            })
            .collect()
    }

    fn profile(&self, input: &BorrowerInput) -> Result<BorrowerProfile, PredictionError> {
        build_profile(input).map_err(|err| {
            error!(error = %err, "borrower input outside the form schema");
            PredictionError::Configuration(err)
        })
    }
}

fn inference_failed(stage: &'static str, err: InferenceError) -> PredictionError {
    warn!(stage, error = %err, "prediction failed");
    PredictionError::Inference(err)
}

/// Eligibility label together with the features it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityAssessment {
    pub label: EligibilityLabel,
    pub engineered: EngineeredRecord,
}

impl EligibilityAssessment {
    pub fn risk_score(&self) -> f64 {
        self.engineered.risk_score().unwrap_or_default()
    }

    pub fn insights(&self) -> EligibilityInsights {
        EligibilityInsights::from_record(&self.engineered)
    }
}

/// Estimated maximum EMI together with the features it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmiEstimate {
    pub amount: f64,
    pub engineered: EngineeredRecord,
}

impl EmiEstimate {
    pub fn savings_ratio(&self) -> f64 {
        savings_ratio(self.engineered.monthly_salary(), self.amount)
    }

    pub fn insights(&self) -> EstimationInsights {
        EstimationInsights::from_estimate(&self.engineered, self.amount)
    }
}

/// Error raised by the prediction service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("prediction failed: {0}")]
    Inference(#[from] InferenceError),
}
