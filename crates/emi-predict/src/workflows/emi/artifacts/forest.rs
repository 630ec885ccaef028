use serde::{Deserialize, Serialize};

use super::{check_row, Classifier, InferenceError, Regressor, SchemaError};

/// A node in a fitted decision tree.
///
/// Rows with `row[feature] <= threshold` follow `left`. Classification leaves hold the index of
/// the predicted class in the forest's `classes`; regression leaves hold the predicted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Leaf {
        value: f64,
    },
}

impl TreeNode {
    pub fn evaluate(&self, row: &[f64]) -> Result<f64, InferenceError> {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { value } => return Ok(*value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = row.get(*feature).ok_or(InferenceError::FeatureOutOfRange {
                        feature: *feature,
                        width: row.len(),
                    })?;
                    node = if value <= threshold { &**left } else { &**right };
                }
            }
        }
    }

    fn validate(
        &self,
        n_features: usize,
        leaf_ok: &dyn Fn(f64) -> bool,
    ) -> Result<(), SchemaError> {
        match self {
            TreeNode::Leaf { value } => {
                if leaf_ok(*value) {
                    Ok(())
                } else {
                    Err(SchemaError::Invalid(format!("invalid leaf value {value}")))
                }
            }
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if *feature >= n_features {
                    return Err(SchemaError::Invalid(format!(
                        "split on feature {feature} but the forest declares {n_features}"
                    )));
                }
                if !threshold.is_finite() {
                    return Err(SchemaError::NonFinite("tree threshold"));
                }
                left.validate(n_features, leaf_ok)?;
                right.validate(n_features, leaf_ok)
            }
        }
    }
}

/// Majority vote over trees; ties go to the class listed first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    pub classes: Vec<i64>,
    pub n_features: usize,
    pub trees: Vec<TreeNode>,
}

impl RandomForestClassifier {
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.classes.is_empty() || self.trees.is_empty() || self.n_features == 0 {
            return Err(SchemaError::Invalid(
                "random forest classifier needs classes, features and trees".to_string(),
            ));
        }
        let class_count = self.classes.len();
        let leaf_ok = move |value: f64| {
            value.fract() == 0.0 && value >= 0.0 && (value as usize) < class_count
        };
        for tree in &self.trees {
            tree.validate(self.n_features, &leaf_ok)?;
        }
        Ok(())
    }
}

impl Classifier for RandomForestClassifier {
    fn predict(&self, row: &[f64]) -> Result<i64, InferenceError> {
        if self.trees.is_empty() || self.classes.is_empty() {
            return Err(InferenceError::Unfitted("random forest classifier"));
        }
        check_row("random forest classifier", self.n_features, row)?;

        let mut votes = vec![0usize; self.classes.len()];
        for tree in &self.trees {
            let leaf = tree.evaluate(row)?;
            if let Some(count) = votes.get_mut(leaf as usize) {
                *count += 1;
            }
        }

        let mut winner = 0;
        for (index, count) in votes.iter().enumerate().skip(1) {
            if *count > votes[winner] {
                winner = index;
            }
        }
        Ok(self.classes[winner])
    }
}

/// Mean of the tree outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    pub n_features: usize,
    pub trees: Vec<TreeNode>,
}

impl RandomForestRegressor {
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.trees.is_empty() || self.n_features == 0 {
            return Err(SchemaError::Invalid(
                "random forest regressor needs features and trees".to_string(),
            ));
        }
        for tree in &self.trees {
            tree.validate(self.n_features, &|value: f64| value.is_finite())?;
        }
        Ok(())
    }
}

impl Regressor for RandomForestRegressor {
    fn predict(&self, row: &[f64]) -> Result<f64, InferenceError> {
        if self.trees.is_empty() {
            return Err(InferenceError::Unfitted("random forest regressor"));
        }
        check_row("random forest regressor", self.n_features, row)?;

        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.evaluate(row)?;
        }
        Ok(total / self.trees.len() as f64)
    }
}
