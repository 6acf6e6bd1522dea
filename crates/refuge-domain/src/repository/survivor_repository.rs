//! Survivor Repository - Abstract persistence for Survivors
//!
//! This trait defines what operations the domain needs.
//! How they're implemented (SQLite, memory) is not our concern here.

use crate::model::location::Location;
use crate::model::survivor::{NewSurvivor, Survivor, SurvivorId};

/// Errors that can occur during repository operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Survivor not found
    NotFound { id: SurvivorId },
    /// Name already taken by another survivor
    DuplicateName { name: String },
    /// Record rejected before it reached storage
    InvalidRecord { message: String },
    /// Failed to persist
    PersistenceError { message: String },
    /// Concurrent modification detected
    ConcurrencyError { id: SurvivorId },
}

impl core::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RepositoryError::NotFound { id } => {
                write!(f, "Survivor not found: {}", id)
            }
            RepositoryError::DuplicateName { name } => {
                write!(f, "Survivor name already registered: {}", name)
            }
            RepositoryError::InvalidRecord { message } => {
                write!(f, "Invalid record: {}", message)
            }
            RepositoryError::PersistenceError { message } => {
                write!(f, "Persistence error: {}", message)
            }
            RepositoryError::ConcurrencyError { id } => {
                write!(f, "Concurrent modification for survivor: {}", id)
            }
        }
    }
}

/// Compare-and-swap write of the infection fields.
///
/// The write applies only if the stored `report_count` still equals
/// `expected_report_count` and the survivor is not yet infected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfectionUpdate {
    pub expected_report_count: u32,
    pub report_count: u32,
    pub is_infected: bool,
}

/// Survivor Repository Trait
///
/// This is a PORT in hexagonal architecture.
/// The domain defines what it needs; adapters provide implementations.
///
/// Every method must be atomic on its own. `update_infection` in
/// particular must check and write in one step: if another writer
/// changed the record since it was read, return
/// [`RepositoryError::ConcurrencyError`] and write nothing.
pub trait SurvivorRepository {
    /// Store a new survivor (healthy, zero reports) and return its id
    fn insert(&mut self, survivor: &NewSurvivor) -> Result<SurvivorId, RepositoryError>;

    /// Find a survivor by ID
    fn find_by_id(&self, id: SurvivorId) -> Result<Option<Survivor>, RepositoryError>;

    /// Overwrite the location. `NotFound` if no record has this id.
    fn update_location(&mut self, id: SurvivorId, location: Location) -> Result<(), RepositoryError>;

    /// Write infection status and report count together
    fn update_infection(
        &mut self,
        id: SurvivorId,
        update: &InfectionUpdate,
    ) -> Result<(), RepositoryError>;

    /// Delete a survivor
    fn delete(&mut self, id: SurvivorId) -> Result<(), RepositoryError>;

    /// List all survivors in storage order
    fn list_all(&self) -> Result<Vec<Survivor>, RepositoryError>;

    /// Check if a survivor exists
    fn exists(&self, id: SurvivorId) -> Result<bool, RepositoryError> {
        Ok(self.find_by_id(id)?.is_some())
    }

    /// Count all survivors
    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.list_all()?.len())
    }
}
