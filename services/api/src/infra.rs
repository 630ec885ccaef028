use crate::cli::ArtifactArgs;
use emi_predict::config::{AppConfig, ModelConfig};
use emi_predict::error::AppError;
use emi_predict::workflows::emi::{ArtifactRegistry, EmiPredictionService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Artifact locations from the environment, with the CLI directory taking precedence.
pub(crate) fn model_config(args: ArtifactArgs) -> Result<ModelConfig, AppError> {
    match args.artifact_dir {
        Some(dir) => Ok(ModelConfig::from_env_in(dir)?),
        None => Ok(AppConfig::load()?.models),
    }
}

pub(crate) fn load_service(models: &ModelConfig) -> Result<Arc<EmiPredictionService>, AppError> {
    let registry = ArtifactRegistry::load(models)?;
    Ok(Arc::new(EmiPredictionService::new(Arc::new(registry))))
}
