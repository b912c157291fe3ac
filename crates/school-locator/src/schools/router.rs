use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use super::params::{parse_school_id, LookupQuery, ProximityQuery};
use super::repository::SchoolRepository;
use super::service::{SchoolLookup, SchoolService, SchoolServiceError};

/// Uniform success body: a human-readable message plus the payload, if any.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    fn with_data(message: &'static str, data: T) -> Self {
        Self {
            message,
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    fn message_only(message: &'static str) -> Self {
        Self {
            message,
            data: None,
        }
    }
}

type HandlerResult = Result<Response, SchoolServiceError>;

/// Router builder exposing the school CRUD and proximity endpoints.
pub fn school_router<R>(service: Arc<SchoolService<R>>) -> Router
where
    R: SchoolRepository + 'static,
{
    Router::new()
        .route("/api/v1/addSchool", post(add_handler::<R>))
        .route("/api/v1/listSchool", get(list_handler::<R>))
        .route("/api/v1/getSchool", get(lookup_handler::<R>))
        .route("/api/v1/updateSchool/:id", put(update_handler::<R>))
        .route("/api/v1/deleteSchool/:id", delete(delete_handler::<R>))
        .with_state(service)
}

pub(crate) async fn add_handler<R>(
    State(service): State<Arc<SchoolService<R>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> HandlerResult
where
    R: SchoolRepository + 'static,
{
    let Json(payload) = payload.map_err(body_rejection)?;
    let school = service.add(&payload)?;
    info!(school_id = %school.id, "school created");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_data("School added successfully", school)),
    )
        .into_response())
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<SchoolService<R>>>,
    query: Result<Query<ProximityQuery>, QueryRejection>,
) -> HandlerResult
where
    R: SchoolRepository + 'static,
{
    let Query(query) = query.map_err(query_rejection)?;
    let ranked = service.list_by_proximity(&query)?;
    debug!(count = ranked.len(), "ranked schools by proximity");

    Ok(Json(Envelope::with_data(
        "Schools fetched and sorted by proximity successfully",
        ranked,
    ))
    .into_response())
}

pub(crate) async fn lookup_handler<R>(
    State(service): State<Arc<SchoolService<R>>>,
    query: Result<Query<LookupQuery>, QueryRejection>,
) -> HandlerResult
where
    R: SchoolRepository + 'static,
{
    let Query(query) = query.map_err(query_rejection)?;
    let lookup = service.lookup(&query)?;
    let message = match lookup {
        SchoolLookup::One(_) => "School fetched successfully",
        SchoolLookup::Many(_) => "Schools fetched successfully",
    };

    Ok(Json(Envelope::with_data(message, lookup)).into_response())
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<SchoolService<R>>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> HandlerResult
where
    R: SchoolRepository + 'static,
{
    let id = parse_school_id(&raw_id)?;
    let Json(payload) = payload.map_err(body_rejection)?;
    let school = service.update(id, &payload)?;
    info!(school_id = %school.id, "school updated");

    Ok(Json(Envelope::with_data("School updated successfully", school)).into_response())
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<SchoolService<R>>>,
    Path(raw_id): Path<String>,
) -> HandlerResult
where
    R: SchoolRepository + 'static,
{
    let id = parse_school_id(&raw_id)?;
    service.delete(id)?;
    info!(school_id = %id, "school deleted");

    Ok(Json(Envelope::message_only("School deleted successfully")).into_response())
}

fn body_rejection(rejection: JsonRejection) -> SchoolServiceError {
    SchoolServiceError::MalformedRequest(rejection.body_text())
}

fn query_rejection(rejection: QueryRejection) -> SchoolServiceError {
    SchoolServiceError::MalformedRequest(rejection.body_text())
}

impl IntoResponse for SchoolServiceError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            SchoolServiceError::Validation(errors) => {
                debug!(fields = ?errors.fields(), "rejected school payload");
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "message": "Invalid input data", "details": errors }),
                )
            }
            SchoolServiceError::Parameter(error) => (
                StatusCode::BAD_REQUEST,
                json!({ "message": error.to_string(), "details": [error.to_violation()] }),
            ),
            SchoolServiceError::MalformedRequest(detail) => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "Malformed request", "details": detail }),
            ),
            SchoolServiceError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                json!({ "message": format!("School with ID {id} not found") }),
            ),
            SchoolServiceError::Repository(error) => {
                error!(%error, "school store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal Server Error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
