use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};

use crate::schools::domain::{School, SchoolFields, SchoolId};
use crate::schools::repository::{InMemorySchoolRepository, RepositoryError, SchoolRepository};
use crate::schools::{school_router, SchoolService};

pub(super) fn payload(name: &str, address: &str, latitude: f64, longitude: f64) -> Value {
    json!({
        "name": name,
        "address": address,
        "latitude": latitude,
        "longitude": longitude,
    })
}

pub(super) fn lincoln_high() -> Value {
    payload("Lincoln High", "2600 SW 9th St, Des Moines", 41.5586, -93.6262)
}

pub(super) fn build_service() -> (
    SchoolService<InMemorySchoolRepository>,
    Arc<InMemorySchoolRepository>,
) {
    let repository = Arc::new(InMemorySchoolRepository::default());
    (SchoolService::new(repository.clone()), repository)
}

/// Service pre-loaded with three schools along the equator at longitudes 0, 1 and -2.
pub(super) fn equatorial_service() -> (
    SchoolService<InMemorySchoolRepository>,
    Arc<InMemorySchoolRepository>,
) {
    let (service, repository) = build_service();
    for (name, longitude) in [("A", 0.0), ("B", 1.0), ("C", -2.0)] {
        service
            .add(&payload(name, "Equator Road", 0.0, longitude))
            .expect("seed school");
    }
    (service, repository)
}

pub(super) fn school_router_with_service(
    service: SchoolService<InMemorySchoolRepository>,
) -> axum::Router {
    school_router(Arc::new(service))
}

pub(super) fn json_request(
    method: &str,
    uri: &str,
    body: &Value,
) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(body).expect("serialize body"),
        ))
        .expect("valid request")
}

pub(super) fn empty_request(method: &str, uri: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .expect("valid request")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) struct UnavailableRepository;

impl SchoolRepository for UnavailableRepository {
    fn create(&self, _fields: SchoolFields) -> Result<School, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_unique(&self, _id: SchoolId) -> Result<Option<School>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_many(&self, _limit: Option<usize>) -> Result<Vec<School>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _id: SchoolId, _fields: SchoolFields) -> Result<School, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: SchoolId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
