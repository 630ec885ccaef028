use serde::{Deserialize, Serialize};

use super::{
    check_finite, check_row, check_width, Classifier, InferenceError, Regressor, SchemaError,
};

/// Multinomial (or binary) logistic regression reduced to its decision rule.
///
/// With one coefficient row per class the prediction is the arg-max of the linear scores.
/// A single row encodes the binary case: `classes[1]` when the score is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub classes: Vec<i64>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

impl LogisticRegression {
    pub fn n_features(&self) -> usize {
        self.coef.first().map(Vec::len).unwrap_or(0)
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.classes.len() < 2 {
            return Err(SchemaError::Invalid(
                "logistic regression needs at least two classes".to_string(),
            ));
        }

        let rows = if self.classes.len() == 2 && self.coef.len() == 1 {
            1
        } else {
            self.classes.len()
        };
        check_width("logistic regression coef", rows, self.coef.len())?;
        check_width("logistic regression intercept", rows, self.intercept.len())?;

        let width = self.n_features();
        if width == 0 {
            return Err(SchemaError::Invalid(
                "logistic regression has no coefficients".to_string(),
            ));
        }
        for row in &self.coef {
            check_width("logistic regression coef row", width, row.len())?;
            check_finite("logistic regression coef", row)?;
        }
        check_finite("logistic regression intercept", &self.intercept)
    }

    fn scores(&self, row: &[f64]) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(weights, intercept)| dot(weights, row) + intercept)
            .collect()
    }
}

impl Classifier for LogisticRegression {
    fn predict(&self, row: &[f64]) -> Result<i64, InferenceError> {
        if self.coef.is_empty() || self.classes.is_empty() {
            return Err(InferenceError::Unfitted("logistic regression"));
        }
        check_row("logistic regression", self.n_features(), row)?;

        let scores = self.scores(row);
        let index = if scores.len() == 1 {
            usize::from(scores[0] > 0.0)
        } else {
            arg_max(&scores)
        };

        self.classes
            .get(index)
            .copied()
            .ok_or(InferenceError::Unfitted("logistic regression"))
    }
}

/// Ordinary least squares regressor: `coef · x + intercept`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl LinearRegression {
    pub fn n_features(&self) -> usize {
        self.coef.len()
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.coef.is_empty() {
            return Err(SchemaError::Invalid(
                "linear regression has no coefficients".to_string(),
            ));
        }
        check_finite("linear regression coef", &self.coef)?;
        check_finite("linear regression intercept", &[self.intercept])
    }
}

impl Regressor for LinearRegression {
    fn predict(&self, row: &[f64]) -> Result<f64, InferenceError> {
        if self.coef.is_empty() {
            return Err(InferenceError::Unfitted("linear regression"));
        }
        check_row("linear regression", self.n_features(), row)?;
        Ok(dot(&self.coef, row) + self.intercept)
    }
}

fn dot(weights: &[f64], row: &[f64]) -> f64 {
    weights.iter().zip(row).map(|(w, x)| w * x).sum()
}

/// First index of the maximum; earlier entries win ties.
fn arg_max(values: &[f64]) -> usize {
    let mut best = 0;
    for (index, value) in values.iter().enumerate().skip(1) {
        if *value > values[best] {
            best = index;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_class() -> LogisticRegression {
        LogisticRegression {
            classes: vec![0, 1, 2],
            coef: vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![-1.0, -1.0]],
            intercept: vec![0.0, 0.0, 0.5],
        }
    }

    #[test]
    fn multinomial_picks_highest_score() {
        let model = three_class();
        assert_eq!(model.predict(&[2.0, 1.0]).expect("predicts"), 0);
        assert_eq!(model.predict(&[0.0, 3.0]).expect("predicts"), 1);
        assert_eq!(model.predict(&[-1.0, -1.0]).expect("predicts"), 2);
    }

    #[test]
    fn ties_resolve_to_the_first_class() {
        let model = three_class();
        assert_eq!(model.predict(&[1.0, 1.0]).expect("predicts"), 0);
    }

    #[test]
    fn binary_row_uses_sign_of_score() {
        let model = LogisticRegression {
            classes: vec![0, 2],
            coef: vec![vec![1.0]],
            intercept: vec![-0.5],
        };
        assert!(model.validate().is_ok());
        assert_eq!(model.predict(&[0.4]).expect("predicts"), 0);
        assert_eq!(model.predict(&[0.6]).expect("predicts"), 2);
    }

    #[test]
    fn validation_rejects_ragged_coefficients() {
        let mut model = three_class();
        model.coef[1].push(4.0);
        assert!(matches!(model.validate(), Err(SchemaError::Width { .. })));
    }

    #[test]
    fn linear_regression_applies_intercept() {
        let model = LinearRegression {
            coef: vec![2.0, -1.0],
            intercept: 100.0,
        };
        assert_eq!(model.predict(&[3.0, 4.0]).expect("predicts"), 102.0);
        assert!(matches!(
            model.predict(&[1.0]),
            Err(InferenceError::ShapeMismatch { expected: 2, .. })
        ));
    }
}
