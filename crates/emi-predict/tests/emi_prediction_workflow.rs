use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use emi_predict::config::ModelConfig;
use emi_predict::workflows::emi::batch::write_outcomes;
use emi_predict::workflows::emi::{
    ArtifactError, ArtifactRegistry, BatchMode, BorrowerBatch, BorrowerInput, EligibilityLabel,
    EmiPredictionService,
};
use serde_json::json;
use tempfile::TempDir;

fn shipped_artifacts() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../artifacts")
}

fn shipped_service() -> EmiPredictionService {
    let registry = ArtifactRegistry::load(&ModelConfig::in_dir(shipped_artifacts()))
        .expect("shipped artifacts load");
    EmiPredictionService::new(Arc::new(registry))
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-6
}

/// Writes a minimal, internally consistent artifact set and returns its directory.
fn write_artifacts(classifier: serde_json::Value, regressor: serde_json::Value) -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    let scaler = |names: &[&str]| {
        json!({
            "feature_names_in": names,
            "mean": vec![0.0; names.len()],
            "scale": vec![1.0; names.len()],
        })
    };

    let files = [
        (
            "scaler_classification.json",
            scaler(&["risk_score", "requested_amount"]),
        ),
        ("best_classification_model.json", classifier),
        (
            "scaler_regression.json",
            scaler(&["monthly_salary", "current_emi_amount"]),
        ),
        ("best_regression_model.json", regressor),
    ];
    for (name, value) in files {
        fs::write(
            dir.path().join(name),
            serde_json::to_vec_pretty(&value).expect("serialize artifact"),
        )
        .expect("write artifact");
    }
    dir
}

fn two_feature_classifier() -> serde_json::Value {
    json!({
        "kind": "random_forest",
        "classes": [0, 1, 2],
        "n_features": 2,
        "trees": [{
            "node": "split",
            "feature": 0,
            "threshold": 0.6,
            "left": { "node": "leaf", "value": 1.0 },
            "right": { "node": "leaf", "value": 0.0 }
        }]
    })
}

fn two_feature_regressor() -> serde_json::Value {
    json!({ "kind": "linear_regression", "coef": [0.25, -1.0], "intercept": 100.0 })
}

#[test]
fn shipped_artifacts_classify_sample_borrowers() {
    let service = shipped_service();
    let cases = [
        (BorrowerInput::default(), EligibilityLabel::Eligible),
        (
            BorrowerInput {
                credit_score: 500,
                current_emi_amount: 5_000,
                ..BorrowerInput::default()
            },
            EligibilityLabel::HighRisk,
        ),
        (
            BorrowerInput {
                credit_score: 350,
                current_emi_amount: 30_000,
                ..BorrowerInput::default()
            },
            EligibilityLabel::NotEligible,
        ),
    ];

    for (input, expected) in cases {
        let assessment = service.assess_eligibility(&input).expect("assessment");
        assert_eq!(assessment.label, expected, "input {input:?}");
        assert!((0.0..=1.0).contains(&assessment.risk_score()));
    }
}

#[test]
fn shipped_artifacts_estimate_max_emi() {
    let service = shipped_service();

    let estimate = service
        .estimate_max_emi(&BorrowerInput::default())
        .expect("estimate");
    assert!(close(estimate.amount, 28_000.0 / 3.0));

    let high_earner = BorrowerInput {
        credit_score: 900,
        monthly_salary: 150_000,
        ..BorrowerInput::default()
    };
    let estimate = service.estimate_max_emi(&high_earner).expect("estimate");
    assert!(close(estimate.amount, 77_000.0 / 3.0));
}

#[test]
fn loads_forest_classifier_and_linear_regressor() {
    let dir = write_artifacts(two_feature_classifier(), two_feature_regressor());
    let registry = ArtifactRegistry::load(&ModelConfig::in_dir(dir.path())).expect("load");
    let service = EmiPredictionService::new(Arc::new(registry));

    let assessment = service
        .assess_eligibility(&BorrowerInput::default())
        .expect("assessment");
    assert_eq!(assessment.label, EligibilityLabel::Eligible);

    let low_credit = BorrowerInput {
        credit_score: 0,
        ..BorrowerInput::default()
    };
    let assessment = service.assess_eligibility(&low_credit).expect("assessment");
    assert_eq!(assessment.label, EligibilityLabel::HighRisk);

    let estimate = service
        .estimate_max_emi(&BorrowerInput::default())
        .expect("estimate");
    assert_eq!(estimate.amount, 12_600.0);
}

#[test]
fn width_mismatch_between_scaler_and_model_is_fatal() {
    let regressor = json!({
        "kind": "linear_regression",
        "coef": [1.0, 1.0, 1.0],
        "intercept": 0.0
    });
    let dir = write_artifacts(two_feature_classifier(), regressor);

    let err = ArtifactRegistry::load(&ModelConfig::in_dir(dir.path())).expect_err("mismatch");

    match err {
        ArtifactError::Mismatch {
            scaler_width,
            model_width,
            ..
        } => {
            assert_eq!(scaler_width, 2);
            assert_eq!(model_width, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_model_kind_is_a_parse_error() {
    let classifier = json!({ "kind": "gradient_boosting", "estimators": [] });
    let dir = write_artifacts(classifier, two_feature_regressor());

    let err = ArtifactRegistry::load(&ModelConfig::in_dir(dir.path())).expect_err("parse error");

    assert!(matches!(err, ArtifactError::Parse { .. }));
    assert!(err.to_string().contains("best_classification_model.json"));
}

#[test]
fn missing_artifact_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");

    let err = ArtifactRegistry::load(&ModelConfig::in_dir(dir.path())).expect_err("io error");

    assert!(matches!(err, ArtifactError::Io { .. }));
}

#[test]
fn duplicate_scaler_features_are_rejected() {
    let dir = write_artifacts(two_feature_classifier(), two_feature_regressor());
    fs::write(
        dir.path().join("scaler_regression.json"),
        json!({
            "feature_names_in": ["monthly_salary", "monthly_salary"],
            "mean": [0.0, 0.0],
            "scale": [1.0, 1.0],
        })
        .to_string(),
    )
    .expect("overwrite scaler");

    let err = ArtifactRegistry::load(&ModelConfig::in_dir(dir.path())).expect_err("schema error");

    assert!(matches!(err, ArtifactError::Schema { .. }));
}

#[test]
fn batch_file_round_trips_to_scored_csv() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input_path = dir.path().join("borrowers.csv");
    let mut writer = csv::Writer::from_path(&input_path).expect("csv writer");
    writer
        .serialize(BorrowerInput::default())
        .expect("write row");
    writer
        .serialize(BorrowerInput {
            gender: "Unspecified".to_string(),
            ..BorrowerInput::default()
        })
        .expect("write row");
    writer.flush().expect("flush csv");

    let batch = BorrowerBatch::from_path(&input_path).expect("batch loads");
    let outcomes = shipped_service().score_batch(&batch, BatchMode::Eligibility);

    let mut output = Vec::new();
    write_outcomes(&mut output, &outcomes).expect("write outcomes");
    let output = String::from_utf8(output).expect("utf8 output");
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], "row,label,risk_score,amount,error");
    assert!(lines[1].starts_with("1,Eligible,0.674"));
    assert!(lines[2].starts_with("2,,,,"));
    assert!(lines[2].contains("Unspecified"));
}
