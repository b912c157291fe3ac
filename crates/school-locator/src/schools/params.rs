use std::ops::RangeInclusive;

use serde::Deserialize;

use super::domain::{Coordinate, SchoolId, LATITUDE_BOUNDS, LONGITUDE_BOUNDS};
use super::validation::{FieldViolation, ViolationKind};

/// Rejected query or path parameter. Parameters fail fast on the first problem.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    #[error("{name} is required")]
    Missing { name: &'static str },
    #[error("{name} must be a valid number, found '{value}'")]
    NotNumeric { name: &'static str, value: String },
    #[error("{name} must be a non-negative integer, found '{value}'")]
    NotInteger { name: &'static str, value: String },
    #[error("{name} must be between {min} and {max}, found {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl ParameterError {
    pub fn name(&self) -> &'static str {
        match self {
            ParameterError::Missing { name }
            | ParameterError::NotNumeric { name, .. }
            | ParameterError::NotInteger { name, .. }
            | ParameterError::OutOfRange { name, .. } => name,
        }
    }

    pub fn kind(&self) -> ViolationKind {
        match self {
            ParameterError::Missing { .. } => ViolationKind::MissingParameter,
            ParameterError::NotNumeric { .. } | ParameterError::NotInteger { .. } => {
                ViolationKind::TypeMismatch
            }
            ParameterError::OutOfRange { .. } => ViolationKind::OutOfRange,
        }
    }

    pub fn to_violation(&self) -> FieldViolation {
        FieldViolation::new(self.name(), self.kind(), self.to_string())
    }
}

/// Raw `latitude`/`longitude` query string for the proximity listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProximityQuery {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl ProximityQuery {
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: Some(latitude.into()),
            longitude: Some(longitude.into()),
        }
    }

    /// Parse the query point, holding it to the same bounds as stored coordinates.
    ///
    /// Both values must be present before either is parsed, so a missing
    /// coordinate is reported ahead of a malformed one.
    pub fn origin(&self) -> Result<Coordinate, ParameterError> {
        let raw_latitude = present(self.latitude.as_deref())
            .ok_or(ParameterError::Missing { name: "latitude" })?;
        let raw_longitude = present(self.longitude.as_deref())
            .ok_or(ParameterError::Missing { name: "longitude" })?;

        let latitude = coordinate_param("latitude", raw_latitude, &LATITUDE_BOUNDS)?;
        let longitude = coordinate_param("longitude", raw_longitude, &LONGITUDE_BOUNDS)?;
        Ok(Coordinate::new(latitude, longitude))
    }
}

/// Raw `id`/`limit` query string for direct lookups.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupQuery {
    pub id: Option<String>,
    pub limit: Option<String>,
}

impl LookupQuery {
    /// `None` when no id was supplied (or it was blank), meaning "list".
    pub fn id(&self) -> Result<Option<SchoolId>, ParameterError> {
        present(self.id.as_deref())
            .map(|raw| integer_param("id", raw).map(SchoolId))
            .transpose()
    }

    pub fn limit(&self) -> Result<Option<usize>, ParameterError> {
        present(self.limit.as_deref())
            .map(|raw| {
                integer_param("limit", raw)
                    .map(|limit| usize::try_from(limit).unwrap_or(usize::MAX))
            })
            .transpose()
    }
}

/// Parse a school id taken from a path segment.
pub fn parse_school_id(raw: &str) -> Result<SchoolId, ParameterError> {
    match present(Some(raw)) {
        Some(value) => integer_param("id", value).map(SchoolId),
        None => Err(ParameterError::Missing { name: "id" }),
    }
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn coordinate_param(
    name: &'static str,
    raw: &str,
    bounds: &RangeInclusive<f64>,
) -> Result<f64, ParameterError> {
    let value = raw
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ParameterError::NotNumeric {
            name,
            value: raw.to_string(),
        })?;

    if bounds.contains(&value) {
        Ok(value)
    } else {
        Err(ParameterError::OutOfRange {
            name,
            value,
            min: *bounds.start(),
            max: *bounds.end(),
        })
    }
}

fn integer_param(name: &'static str, raw: &str) -> Result<u64, ParameterError> {
    raw.parse::<u64>()
        .map_err(|_| ParameterError::NotInteger {
            name,
            value: raw.to_string(),
        })
}
