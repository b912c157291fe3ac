//! School directory: validated records, store abstraction, and proximity ranking.
//!
//! Mutations pass through [`validate_school`] before they reach a
//! [`SchoolRepository`]; listings are fetched whole and ordered by
//! [`rank_by_proximity`]. Both core pieces are pure functions so the HTTP layer
//! in [`router`] only wires extractors to the service.

pub mod domain;
pub mod params;
pub mod proximity;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Coordinate, RankedSchool, School, SchoolFields, SchoolId, LATITUDE_BOUNDS, LONGITUDE_BOUNDS,
};
pub use params::{parse_school_id, LookupQuery, ParameterError, ProximityQuery};
pub use proximity::{haversine_km, rank_by_proximity, EARTH_MEAN_RADIUS_KM};
pub use repository::{InMemorySchoolRepository, RepositoryError, SchoolRepository};
pub use router::school_router;
pub use service::{SchoolLookup, SchoolService, SchoolServiceError};
pub use validation::{validate_school, FieldViolation, ValidationErrors, ViolationKind};
