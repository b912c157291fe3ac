use crate::config::ConfigError;
use crate::schools::SchoolServiceError;
use crate::telemetry::TelemetryError;

/// Failures that stop the service from starting or serving.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("school service error: {0}")]
    Service(#[from] SchoolServiceError),
    #[error("{0}")]
    Rejected(String),
}
