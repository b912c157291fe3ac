use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::domain::{RankedSchool, School, SchoolId};
use super::params::{LookupQuery, ParameterError, ProximityQuery};
use super::proximity::rank_by_proximity;
use super::repository::{RepositoryError, SchoolRepository};
use super::validation::{validate_school, ValidationErrors};

/// Service composing the validator, the record store, and the proximity ranker.
pub struct SchoolService<R> {
    repository: Arc<R>,
}

/// Result of a `getSchool` lookup: a single record when an id was given, otherwise a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SchoolLookup {
    One(School),
    Many(Vec<School>),
}

impl<R> SchoolService<R>
where
    R: SchoolRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate a candidate payload and persist it as a new school.
    pub fn add(&self, payload: &Value) -> Result<School, SchoolServiceError> {
        let fields = validate_school(payload)?;
        let school = self.repository.create(fields)?;
        Ok(school)
    }

    /// Every stored school ordered by distance from the query point.
    pub fn list_by_proximity(
        &self,
        query: &ProximityQuery,
    ) -> Result<Vec<RankedSchool>, SchoolServiceError> {
        let origin = query.origin()?;
        let schools = self.repository.find_many(None)?;
        Ok(rank_by_proximity(origin, schools))
    }

    pub fn lookup(&self, query: &LookupQuery) -> Result<SchoolLookup, SchoolServiceError> {
        match query.id()? {
            Some(id) => self.get(id).map(SchoolLookup::One),
            None => {
                let limit = query.limit()?;
                let schools = self.repository.find_many(limit)?;
                Ok(SchoolLookup::Many(schools))
            }
        }
    }

    pub fn get(&self, id: SchoolId) -> Result<School, SchoolServiceError> {
        self.repository
            .find_unique(id)?
            .ok_or(SchoolServiceError::NotFound(id))
    }

    /// Replace all four fields of an existing school.
    ///
    /// The payload is validated before the store is consulted, so a bad payload
    /// for a missing id reports the validation errors rather than 404.
    pub fn update(&self, id: SchoolId, payload: &Value) -> Result<School, SchoolServiceError> {
        let fields = validate_school(payload)?;
        self.get(id)?;
        let school = self.repository.update(id, fields)?;
        Ok(school)
    }

    pub fn delete(&self, id: SchoolId) -> Result<(), SchoolServiceError> {
        self.get(id)?;
        self.repository.delete(id)?;
        Ok(())
    }
}

/// Error raised by the school service.
#[derive(Debug, thiserror::Error)]
pub enum SchoolServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error("school with id {0} not found")]
    NotFound(SchoolId),
    #[error("malformed request: {0}")]
    MalformedRequest(String),
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for SchoolServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}
