//! Fitted scalers and predictors consumed by the inference step.
//!
//! Artifacts are produced by an offline training job and shipped as JSON documents. They are
//! read once at startup into an [`ArtifactRegistry`] and shared read-only afterwards, so every
//! capability trait here requires `Send + Sync` and takes `&self`.

mod forest;
mod linear;
mod registry;
mod scaler;

pub use forest::{RandomForestClassifier, RandomForestRegressor, TreeNode};
pub use linear::{LinearRegression, LogisticRegression};
pub use registry::{ArtifactRegistry, ClassifierArtifact, RegressorArtifact};
pub use scaler::StandardScaler;

use std::path::PathBuf;

use super::alignment::FeatureSchemaError;

/// Fitted, position-sensitive transform applied before prediction.
pub trait FeatureScaler: Send + Sync {
    /// Feature names in the exact column order `transform` expects.
    fn feature_names(&self) -> &[String];
    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError>;
}

/// Predicts a class id for one scaled row.
pub trait Classifier: Send + Sync {
    fn predict(&self, row: &[f64]) -> Result<i64, InferenceError>;
}

/// Predicts a real value for one scaled row.
pub trait Regressor: Send + Sync {
    fn predict(&self, row: &[f64]) -> Result<f64, InferenceError>;
}

/// Failure inside a scaler transform or model predict call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("{stage} expects {expected} features but received {actual}")]
    ShapeMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{stage} received a non-finite value at position {position}")]
    NonFiniteInput {
        stage: &'static str,
        position: usize,
    },
    #[error("{stage} produced a non-finite output")]
    NonFiniteOutput { stage: &'static str },
    #[error("tree split references feature {feature} but the row has {width} features")]
    FeatureOutOfRange { feature: usize, width: usize },
    #[error("{0} has no fitted parameters")]
    Unfitted(&'static str),
}

pub(crate) fn check_row(
    stage: &'static str,
    expected: usize,
    row: &[f64],
) -> Result<(), InferenceError> {
    if row.len() != expected {
        return Err(InferenceError::ShapeMismatch {
            stage,
            expected,
            actual: row.len(),
        });
    }

    match row.iter().position(|value| !value.is_finite()) {
        Some(position) => Err(InferenceError::NonFiniteInput { stage, position }),
        None => Ok(()),
    }
}

/// Structural defects detected while validating a loaded artifact.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error(transparent)]
    FeatureNames(#[from] FeatureSchemaError),
    #[error("{what} has {actual} entries but {expected} were expected")]
    Width {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{0} contains a non-finite parameter")]
    NonFinite(&'static str),
    #[error("{0}")]
    Invalid(String),
}

pub(crate) fn check_width(
    what: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), SchemaError> {
    if expected == actual {
        Ok(())
    } else {
        Err(SchemaError::Width {
            what,
            expected,
            actual,
        })
    }
}

pub(crate) fn check_finite(what: &'static str, values: &[f64]) -> Result<(), SchemaError> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(SchemaError::NonFinite(what))
    }
}

/// Startup failure while reading the artifact files. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse artifact {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid artifact {}: {source}", path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },
    #[error(
        "{} emits {scaler_width} features but {} expects {model_width}",
        scaler.display(),
        model.display()
    )]
    Mismatch {
        scaler: PathBuf,
        model: PathBuf,
        scaler_width: usize,
        model_width: usize,
    },
}
