use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{School, SchoolFields, SchoolId};

/// Record store for schools. Implementations own id assignment and uniqueness;
/// they never re-validate the fields they are handed.
pub trait SchoolRepository: Send + Sync {
    fn create(&self, fields: SchoolFields) -> Result<School, RepositoryError>;
    fn find_unique(&self, id: SchoolId) -> Result<Option<School>, RepositoryError>;
    /// Schools in ascending id order, truncated to `limit` when given.
    fn find_many(&self, limit: Option<usize>) -> Result<Vec<School>, RepositoryError>;
    fn update(&self, id: SchoolId, fields: SchoolFields) -> Result<School, RepositoryError>;
    fn delete(&self, id: SchoolId) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("school {0} not found")]
    NotFound(SchoolId),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug)]
struct MemoryState {
    records: BTreeMap<SchoolId, School>,
    next_id: u64,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// Process-local store used by the service binary and tests.
///
/// Ids come from a counter that only moves forward, so a deleted id is never
/// handed out again. Clones share the same underlying records.
#[derive(Debug, Default, Clone)]
pub struct InMemorySchoolRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemorySchoolRepository {
    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("school store mutex poisoned".to_string()))
    }
}

impl SchoolRepository for InMemorySchoolRepository {
    fn create(&self, fields: SchoolFields) -> Result<School, RepositoryError> {
        let mut guard = self.lock()?;
        let id = SchoolId(guard.next_id);
        guard.next_id += 1;

        let school = School::from_fields(id, fields);
        guard.records.insert(id, school.clone());
        Ok(school)
    }

    fn find_unique(&self, id: SchoolId) -> Result<Option<School>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.records.get(&id).cloned())
    }

    fn find_many(&self, limit: Option<usize>) -> Result<Vec<School>, RepositoryError> {
        let guard = self.lock()?;
        let take = limit.unwrap_or(usize::MAX);
        Ok(guard.records.values().take(take).cloned().collect())
    }

    fn update(&self, id: SchoolId, fields: SchoolFields) -> Result<School, RepositoryError> {
        let mut guard = self.lock()?;
        match guard.records.get_mut(&id) {
            Some(existing) => {
                *existing = School::from_fields(id, fields);
                Ok(existing.clone())
            }
            None => Err(RepositoryError::NotFound(id)),
        }
    }

    fn delete(&self, id: SchoolId) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        guard
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(id))
    }
}
