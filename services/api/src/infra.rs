use metrics_exporter_prometheus::PrometheusHandle;
use school_locator::error::AppError;
use school_locator::schools::{School, SchoolRepository, SchoolService, SchoolServiceError};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read a JSON array of candidate school payloads.
pub(crate) fn load_school_payloads(path: &Path) -> Result<Vec<Value>, AppError> {
    let raw = fs::read_to_string(path)?;
    parse_school_payloads(&raw)
}

pub(crate) fn parse_school_payloads(raw: &str) -> Result<Vec<Value>, AppError> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Array(entries) => Ok(entries),
        _ => Err(AppError::Rejected(
            "schools file must contain a JSON array of school objects".to_string(),
        )),
    }
}

/// Validate and store every payload, stopping at the first rejected entry.
pub(crate) fn seed_schools<R>(
    service: &SchoolService<R>,
    payloads: &[Value],
) -> Result<Vec<School>, AppError>
where
    R: SchoolRepository + 'static,
{
    payloads
        .iter()
        .enumerate()
        .map(|(index, payload)| {
            service.add(payload).map_err(|err| match err {
                SchoolServiceError::Validation(errors) => {
                    let reasons: Vec<String> = errors
                        .violations()
                        .iter()
                        .map(ToString::to_string)
                        .collect();
                    AppError::Rejected(format!(
                        "school #{} rejected: {}",
                        index + 1,
                        reasons.join("; ")
                    ))
                }
                other => AppError::Service(other),
            })
        })
        .collect()
}
