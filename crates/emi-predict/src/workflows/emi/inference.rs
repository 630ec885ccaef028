use serde::{Serialize, Serializer};
use tracing::{debug, enabled, warn, Level};

use super::alignment::{align, alignment_gaps};
use super::artifacts::{ArtifactRegistry, FeatureScaler, InferenceError};
use super::engineering::EngineeredRecord;

/// Human-facing eligibility class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EligibilityLabel {
    Eligible,
    HighRisk,
    NotEligible,
    /// The classifier returned an id outside `{0, 1, 2}`.
    Unknown,
}

impl EligibilityLabel {
    pub const fn from_class_id(class_id: i64) -> Self {
        match class_id {
            0 => EligibilityLabel::Eligible,
            1 => EligibilityLabel::HighRisk,
            2 => EligibilityLabel::NotEligible,
            _ => EligibilityLabel::Unknown,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EligibilityLabel::Eligible => "Eligible",
            EligibilityLabel::HighRisk => "High Risk",
            EligibilityLabel::NotEligible => "Not Eligible",
            EligibilityLabel::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for EligibilityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for EligibilityLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

pub fn predict_eligibility(
    registry: &ArtifactRegistry,
    record: &EngineeredRecord,
) -> Result<EligibilityLabel, InferenceError> {
    let scaled = scale(registry.classification_scaler(), record)?;
    let class_id = registry.classifier().predict(&scaled)?;

    let label = EligibilityLabel::from_class_id(class_id);
    if label == EligibilityLabel::Unknown {
        warn!(class_id, "classifier returned an unmapped class id");
    }
    Ok(label)
}

/// Raw regressor output. Negative estimates are passed through untouched.
pub fn estimate_max_emi(
    registry: &ArtifactRegistry,
    record: &EngineeredRecord,
) -> Result<f64, InferenceError> {
    let scaled = scale(registry.regression_scaler(), record)?;
    let amount = registry.regressor().predict(&scaled)?;

    if !amount.is_finite() {
        return Err(InferenceError::NonFiniteOutput { stage: "regressor" });
    }
    if amount < 0.0 {
        warn!(amount, "regressor produced a negative EMI estimate");
    }
    Ok(amount)
}

fn scale(
    scaler: &dyn FeatureScaler,
    record: &EngineeredRecord,
) -> Result<Vec<f64>, InferenceError> {
    let expected = scaler.feature_names();
    if enabled!(Level::DEBUG) {
        let gaps = alignment_gaps(record, expected);
        if !gaps.is_empty() {
            debug!(
                zero_filled = ?gaps.zero_filled,
                dropped = ?gaps.dropped,
                "aligned engineered record to scaler schema"
            );
        }
    }

    scaler.transform(&align(record, expected))
}
