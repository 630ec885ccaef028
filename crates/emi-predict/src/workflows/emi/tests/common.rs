use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::emi::artifacts::{
    ArtifactRegistry, Classifier, FeatureScaler, InferenceError, LinearRegression,
    LogisticRegression, Regressor, StandardScaler,
};
use crate::workflows::emi::domain::BorrowerInput;
use crate::workflows::emi::service::EmiPredictionService;

/// Classification schema: the risk score plus a column the form never collects.
pub(super) fn classification_features() -> Vec<String> {
    ["risk_score", "requested_amount"]
        .iter()
        .map(|name| name.to_string())
        .collect()
}

pub(super) fn regression_features() -> Vec<String> {
    ["monthly_salary", "current_emi_amount"]
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// `z = (risk_score - 0.5) / 0.1`; z > 1 is Eligible, z < -1 is Not Eligible, otherwise High Risk.
pub(super) fn risk_classifier() -> LogisticRegression {
    LogisticRegression {
        classes: vec![0, 1, 2],
        coef: vec![vec![1.0, 0.0], vec![0.0, 0.0], vec![-1.0, 0.0]],
        intercept: vec![-1.0, 0.0, -1.0],
    }
}

/// `0.3 * monthly_salary - current_emi_amount`.
pub(super) fn affordability_regressor() -> LinearRegression {
    LinearRegression {
        coef: vec![0.3, -1.0],
        intercept: 0.0,
    }
}

pub(super) fn classification_scaler() -> StandardScaler {
    StandardScaler {
        feature_names_in: classification_features(),
        mean: vec![0.5, 0.0],
        scale: vec![0.1, 1.0],
    }
}

pub(super) fn identity_scaler(names: Vec<String>) -> StandardScaler {
    let width = names.len();
    StandardScaler {
        feature_names_in: names,
        mean: vec![0.0; width],
        scale: vec![1.0; width],
    }
}

pub(super) fn sample_registry() -> ArtifactRegistry {
    ArtifactRegistry::new(
        Arc::new(classification_scaler()),
        Arc::new(risk_classifier()),
        Arc::new(identity_scaler(regression_features())),
        Arc::new(affordability_regressor()),
    )
}

pub(super) fn registry_with(
    classifier: Arc<dyn Classifier>,
    regressor: Arc<dyn Regressor>,
) -> ArtifactRegistry {
    ArtifactRegistry::new(
        Arc::new(classification_scaler()),
        classifier,
        Arc::new(identity_scaler(regression_features())),
        regressor,
    )
}

pub(super) fn sample_service() -> EmiPredictionService {
    EmiPredictionService::new(Arc::new(sample_registry()))
}

pub(super) fn default_input() -> BorrowerInput {
    BorrowerInput::default()
}

/// Same salary, no expenses, top credit score: risk score 0.97.
pub(super) fn strong_input() -> BorrowerInput {
    BorrowerInput {
        credit_score: 1000,
        monthly_rent: 0,
        school_fees: 0,
        college_fees: 0,
        travel_expenses: 0,
        groceries_utilities: 0,
        other_monthly_expenses: 0,
        ..BorrowerInput::default()
    }
}

/// Default expenses with no credit history: risk score 0.474.
pub(super) fn borderline_input() -> BorrowerInput {
    BorrowerInput {
        credit_score: 0,
        ..BorrowerInput::default()
    }
}

/// Heavy EMI burden and a poor credit score: risk score 0.176.
pub(super) fn weak_input() -> BorrowerInput {
    BorrowerInput {
        credit_score: 100,
        current_emi_amount: 60_000,
        ..BorrowerInput::default()
    }
}

pub(super) struct FixedClassifier(pub(super) i64);

impl Classifier for FixedClassifier {
    fn predict(&self, _row: &[f64]) -> Result<i64, InferenceError> {
        Ok(self.0)
    }
}

pub(super) struct FixedRegressor(pub(super) f64);

impl Regressor for FixedRegressor {
    fn predict(&self, _row: &[f64]) -> Result<f64, InferenceError> {
        Ok(self.0)
    }
}

/// Passes rows through unchanged and remembers what it saw.
pub(super) struct RecordingScaler {
    names: Vec<String>,
    pub(super) seen: Mutex<Vec<Vec<f64>>>,
}

impl RecordingScaler {
    pub(super) fn new(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|name| name.to_string()).collect(),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn rows(&self) -> Vec<Vec<f64>> {
        self.seen.lock().expect("scaler mutex poisoned").clone()
    }
}

impl FeatureScaler for RecordingScaler {
    fn feature_names(&self) -> &[String] {
        &self.names
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError> {
        self.seen
            .lock()
            .expect("scaler mutex poisoned")
            .push(row.to_vec());
        Ok(row.to_vec())
    }
}

/// Mimics a scaler fitted on a different feature width than it declares.
pub(super) struct SkewedScaler {
    names: Vec<String>,
}

impl SkewedScaler {
    pub(super) fn new() -> Self {
        Self {
            names: classification_features(),
        }
    }
}

impl FeatureScaler for SkewedScaler {
    fn feature_names(&self) -> &[String] {
        &self.names
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError> {
        Err(InferenceError::ShapeMismatch {
            stage: "skewed scaler",
            expected: row.len() + 1,
            actual: row.len(),
        })
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
