//! EMI eligibility classification and maximum-EMI estimation.
//!
//! A request flows through [`builder`] (categorical encoding), [`engineering`] (derived
//! ratios), [`alignment`] (projection onto a scaler's feature order) and [`inference`]
//! (scale + predict). [`service::EmiPredictionService`] composes those steps over a shared
//! [`artifacts::ArtifactRegistry`]; [`router`] exposes it over HTTP.

pub mod alignment;
pub mod artifacts;
pub mod batch;
pub mod builder;
pub mod domain;
pub mod engineering;
pub mod form;
pub mod inference;
pub mod insights;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use alignment::align;
pub use artifacts::{
    ArtifactError, ArtifactRegistry, Classifier, FeatureScaler, InferenceError, Regressor,
};
pub use batch::{BatchError, BatchMode, BatchOutcome, BorrowerBatch};
pub use builder::build_profile;
pub use domain::{BorrowerInput, BorrowerProfile, ConfigurationError};
pub use engineering::{engineer, EngineeredRecord, FeatureVariant};
pub use inference::{estimate_max_emi, predict_eligibility, EligibilityLabel};
pub use router::{prediction_router, EligibilityResponse, EstimateResponse};
pub use service::{EligibilityAssessment, EmiEstimate, EmiPredictionService, PredictionError};
