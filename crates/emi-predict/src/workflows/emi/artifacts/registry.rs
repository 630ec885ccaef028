use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{
    ArtifactError, Classifier, FeatureScaler, InferenceError, LinearRegression,
    LogisticRegression, RandomForestClassifier, RandomForestRegressor, Regressor, SchemaError,
    StandardScaler,
};
use crate::config::ModelConfig;

/// Classification model file, tagged by `"kind"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    LogisticRegression(LogisticRegression),
    RandomForest(RandomForestClassifier),
}

impl ClassifierArtifact {
    pub fn n_features(&self) -> usize {
        match self {
            ClassifierArtifact::LogisticRegression(model) => model.n_features(),
            ClassifierArtifact::RandomForest(model) => model.n_features,
        }
    }
}

impl Classifier for ClassifierArtifact {
    fn predict(&self, row: &[f64]) -> Result<i64, InferenceError> {
        match self {
            ClassifierArtifact::LogisticRegression(model) => model.predict(row),
            ClassifierArtifact::RandomForest(model) => model.predict(row),
        }
    }
}

/// Regression model file, tagged by `"kind"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressorArtifact {
    LinearRegression(LinearRegression),
    RandomForest(RandomForestRegressor),
}

impl RegressorArtifact {
    pub fn n_features(&self) -> usize {
        match self {
            RegressorArtifact::LinearRegression(model) => model.n_features(),
            RegressorArtifact::RandomForest(model) => model.n_features,
        }
    }
}

impl Regressor for RegressorArtifact {
    fn predict(&self, row: &[f64]) -> Result<f64, InferenceError> {
        match self {
            RegressorArtifact::LinearRegression(model) => model.predict(row),
            RegressorArtifact::RandomForest(model) => model.predict(row),
        }
    }
}

trait Validate {
    fn validate(&self) -> Result<(), SchemaError>;
}

impl Validate for StandardScaler {
    fn validate(&self) -> Result<(), SchemaError> {
        StandardScaler::validate(self)
    }
}

impl Validate for ClassifierArtifact {
    fn validate(&self) -> Result<(), SchemaError> {
        match self {
            ClassifierArtifact::LogisticRegression(model) => model.validate(),
            ClassifierArtifact::RandomForest(model) => model.validate(),
        }
    }
}

impl Validate for RegressorArtifact {
    fn validate(&self) -> Result<(), SchemaError> {
        match self {
            RegressorArtifact::LinearRegression(model) => model.validate(),
            RegressorArtifact::RandomForest(model) => model.validate(),
        }
    }
}

/// The two scaler/model pairs, loaded once and shared read-only by every request.
#[derive(Clone)]
pub struct ArtifactRegistry {
    classification_scaler: Arc<dyn FeatureScaler>,
    classifier: Arc<dyn Classifier>,
    regression_scaler: Arc<dyn FeatureScaler>,
    regressor: Arc<dyn Regressor>,
}

impl ArtifactRegistry {
    pub fn new(
        classification_scaler: Arc<dyn FeatureScaler>,
        classifier: Arc<dyn Classifier>,
        regression_scaler: Arc<dyn FeatureScaler>,
        regressor: Arc<dyn Regressor>,
    ) -> Self {
        Self {
            classification_scaler,
            classifier,
            regression_scaler,
            regressor,
        }
    }

    /// Reads, parses and cross-checks all four artifact files.
    pub fn load(config: &ModelConfig) -> Result<Self, ArtifactError> {
        let classification_scaler: StandardScaler = load_artifact(&config.classification_scaler)?;
        let classifier: ClassifierArtifact = load_artifact(&config.classification_model)?;
        ensure_compatible(
            &config.classification_scaler,
            classification_scaler.width(),
            &config.classification_model,
            classifier.n_features(),
        )?;

        let regression_scaler: StandardScaler = load_artifact(&config.regression_scaler)?;
        let regressor: RegressorArtifact = load_artifact(&config.regression_model)?;
        ensure_compatible(
            &config.regression_scaler,
            regression_scaler.width(),
            &config.regression_model,
            regressor.n_features(),
        )?;

        info!(
            classification_features = classification_scaler.width(),
            regression_features = regression_scaler.width(),
            "model artifacts loaded"
        );

        Ok(Self::new(
            Arc::new(classification_scaler),
            Arc::new(classifier),
            Arc::new(regression_scaler),
            Arc::new(regressor),
        ))
    }

    pub fn classification_scaler(&self) -> &dyn FeatureScaler {
        self.classification_scaler.as_ref()
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn regression_scaler(&self) -> &dyn FeatureScaler {
        self.regression_scaler.as_ref()
    }

    pub fn regressor(&self) -> &dyn Regressor {
        self.regressor.as_ref()
    }
}

impl fmt::Debug for ArtifactRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactRegistry")
            .field(
                "classification_features",
                &self.classification_scaler.feature_names(),
            )
            .field("regression_features", &self.regression_scaler.feature_names())
            .finish_non_exhaustive()
    }
}

fn load_artifact<T>(path: &Path) -> Result<T, ArtifactError>
where
    T: DeserializeOwned + Validate,
{
    let file = File::open(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let artifact: T =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    artifact.validate().map_err(|source| ArtifactError::Schema {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(artifact)
}

fn ensure_compatible(
    scaler: &Path,
    scaler_width: usize,
    model: &Path,
    model_width: usize,
) -> Result<(), ArtifactError> {
    if scaler_width == model_width {
        Ok(())
    } else {
        Err(ArtifactError::Mismatch {
            scaler: scaler.to_path_buf(),
            model: model.to_path_buf(),
            scaler_width,
            model_width,
        })
    }
}
