use serde::{Deserialize, Serialize};

use super::{check_finite, check_row, check_width, FeatureScaler, InferenceError, SchemaError};
use crate::workflows::emi::alignment::check_feature_names;

/// Per-feature standardization: `(x - mean) / scale`.
///
/// A zero `scale` entry (a constant training column) leaves the centered value unscaled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub feature_names_in: Vec<String>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn width(&self) -> usize {
        self.feature_names_in.len()
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        check_feature_names(&self.feature_names_in)?;
        check_width("scaler mean", self.width(), self.mean.len())?;
        check_width("scaler scale", self.width(), self.scale.len())?;
        check_finite("scaler mean", &self.mean)?;
        check_finite("scaler scale", &self.scale)?;
        if self.scale.iter().any(|scale| *scale < 0.0) {
            return Err(SchemaError::Invalid(
                "scaler scale must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl FeatureScaler for StandardScaler {
    fn feature_names(&self) -> &[String] {
        &self.feature_names_in
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if self.mean.is_empty() {
            return Err(InferenceError::Unfitted("standard scaler"));
        }
        check_row("standard scaler", self.mean.len(), row)?;

        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(value, (mean, scale))| {
                let divisor = if *scale == 0.0 { 1.0 } else { *scale };
                (value - mean) / divisor
            })
            .collect())
    }
}
