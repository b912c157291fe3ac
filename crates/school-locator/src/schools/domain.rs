use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Accepted latitude range in decimal degrees, inclusive.
pub const LATITUDE_BOUNDS: RangeInclusive<f64> = -90.0..=90.0;

/// Accepted longitude range in decimal degrees, inclusive.
pub const LONGITUDE_BOUNDS: RangeInclusive<f64> = -180.0..=180.0;

/// Store-assigned identifier; never reused once handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchoolId(pub u64);

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// The four caller-controlled fields of a school, already validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolFields {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Persisted school record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: SchoolId,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl School {
    pub fn from_fields(id: SchoolId, fields: SchoolFields) -> Self {
        let SchoolFields {
            name,
            address,
            latitude,
            longitude,
        } = fields;

        Self {
            id,
            name,
            address,
            latitude,
            longitude,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Listing view: a school plus its great-circle distance from the query point in kilometers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSchool {
    #[serde(flatten)]
    pub school: School,
    pub distance: f64,
}
