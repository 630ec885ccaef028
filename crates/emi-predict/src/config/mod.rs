use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub models: ModelConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
            models: ModelConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";
pub const CLASSIFICATION_MODEL_FILE: &str = "best_classification_model.json";
pub const CLASSIFICATION_SCALER_FILE: &str = "scaler_classification.json";
pub const REGRESSION_MODEL_FILE: &str = "best_regression_model.json";
pub const REGRESSION_SCALER_FILE: &str = "scaler_regression.json";

/// Locations of the four fitted artifacts loaded at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub classification_model: PathBuf,
    pub classification_scaler: PathBuf,
    pub regression_model: PathBuf,
    pub regression_scaler: PathBuf,
}

impl ModelConfig {
    /// Default file names resolved inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            classification_model: dir.join(CLASSIFICATION_MODEL_FILE),
            classification_scaler: dir.join(CLASSIFICATION_SCALER_FILE),
            regression_model: dir.join(REGRESSION_MODEL_FILE),
            regression_scaler: dir.join(REGRESSION_SCALER_FILE),
        }
    }

    fn from_env() -> Result<Self, ConfigError> {
        let dir = env::var("EMI_ARTIFACT_DIR").unwrap_or_else(|_| DEFAULT_ARTIFACT_DIR.to_string());
        if dir.trim().is_empty() {
            return Err(ConfigError::EmptyArtifactPath {
                variable: "EMI_ARTIFACT_DIR",
            });
        }

        Self::from_env_in(dir.trim())
    }

    /// Default file names inside `dir`, then the per-file `EMI_*` overrides on top.
    pub fn from_env_in(dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = Self::in_dir(dir);
        override_path(&mut config.classification_model, "EMI_CLASSIFICATION_MODEL")?;
        override_path(&mut config.classification_scaler, "EMI_CLASSIFICATION_SCALER")?;
        override_path(&mut config.regression_model, "EMI_REGRESSION_MODEL")?;
        override_path(&mut config.regression_scaler, "EMI_REGRESSION_SCALER")?;
        Ok(config)
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::in_dir(DEFAULT_ARTIFACT_DIR)
    }
}

fn override_path(target: &mut PathBuf, variable: &'static str) -> Result<(), ConfigError> {
    match env::var(variable) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::EmptyArtifactPath { variable }),
        Ok(value) => {
            *target = PathBuf::from(value.trim());
            Ok(())
        }
        Err(_) => Ok(()),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    EmptyArtifactPath { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must be a valid IP address or 'localhost'")
            }
            ConfigError::EmptyArtifactPath { variable } => {
                write!(f, "{variable} must not be empty when set")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort | ConfigError::EmptyArtifactPath { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::Path;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "EMI_ARTIFACT_DIR",
            "EMI_CLASSIFICATION_MODEL",
            "EMI_CLASSIFICATION_SCALER",
            "EMI_REGRESSION_MODEL",
            "EMI_REGRESSION_SCALER",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.telemetry.ansi);
        assert_eq!(
            config.models.classification_model,
            Path::new("artifacts").join("best_classification_model.json")
        );
        assert_eq!(
            config.models.regression_scaler,
            Path::new("artifacts").join("scaler_regression.json")
        );
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn rejects_invalid_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "not-a-port");
        let err = AppConfig::load().expect_err("port must parse");
        assert!(matches!(err, ConfigError::InvalidPort));
        reset_env();
    }

    #[test]
    fn artifact_paths_follow_directory_and_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("EMI_ARTIFACT_DIR", "/srv/emi");
        env::set_var("EMI_REGRESSION_MODEL", "/models/forest.json");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert!(!config.telemetry.ansi);
        assert_eq!(
            config.models.classification_scaler,
            Path::new("/srv/emi").join("scaler_classification.json")
        );
        assert_eq!(
            config.models.regression_model,
            PathBuf::from("/models/forest.json")
        );
        reset_env();
    }

    #[test]
    fn explicit_directory_keeps_per_file_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("EMI_ARTIFACT_DIR", "/srv/emi");
        env::set_var("EMI_CLASSIFICATION_SCALER", "/models/scaler.json");
        let models = ModelConfig::from_env_in("/opt/override").expect("config loads");
        assert_eq!(
            models.classification_scaler,
            PathBuf::from("/models/scaler.json")
        );
        assert_eq!(
            models.classification_model,
            Path::new("/opt/override").join("best_classification_model.json")
        );
        assert_eq!(
            models.regression_scaler,
            Path::new("/opt/override").join("scaler_regression.json")
        );
        reset_env();
    }

    #[test]
    fn blank_artifact_override_is_rejected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("EMI_CLASSIFICATION_SCALER", "  ");
        let err = AppConfig::load().expect_err("blank override rejected");
        assert!(matches!(
            err,
            ConfigError::EmptyArtifactPath {
                variable: "EMI_CLASSIFICATION_SCALER"
            }
        ));
        reset_env();
    }
}
