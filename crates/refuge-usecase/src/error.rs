//! Error taxonomy shared by all use cases
//!
//! `NotFound` and `AlreadyInfected` are ordinary outcomes that callers
//! branch on. Nothing here is fatal and nothing is retried.

use refuge_domain::{FeedError, RepositoryError, SurvivorId, SurvivorStateError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurvivorError {
    /// Referenced survivor does not exist
    NotFound { id: SurvivorId },
    /// Name already registered
    Conflict { name: String },
    /// Infection report against an infected survivor
    AlreadyInfected { id: SurvivorId },
    /// Opaque storage failure
    Storage { message: String },
    /// Robot feed unreachable or unparseable
    Fetch { message: String },
    /// Malformed input
    Validation { message: String },
}

impl SurvivorError {
    pub fn validation(message: impl Into<String>) -> Self {
        SurvivorError::Validation {
            message: message.into(),
        }
    }
}

impl core::fmt::Display for SurvivorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SurvivorError::NotFound { .. } => write!(f, "survivor not found"),
            SurvivorError::Conflict { name } => {
                write!(f, "survivor named '{}' already exists", name)
            }
            SurvivorError::AlreadyInfected { .. } => write!(f, "survivor is already infected"),
            SurvivorError::Storage { message } => write!(f, "storage error: {}", message),
            SurvivorError::Fetch { message } => write!(f, "robot feed error: {}", message),
            SurvivorError::Validation { message } => write!(f, "invalid input: {}", message),
        }
    }
}

impl std::error::Error for SurvivorError {}

impl From<RepositoryError> for SurvivorError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { id } => SurvivorError::NotFound { id },
            RepositoryError::DuplicateName { name } => SurvivorError::Conflict { name },
            RepositoryError::InvalidRecord { message } => SurvivorError::Validation { message },
            err @ (RepositoryError::PersistenceError { .. }
            | RepositoryError::ConcurrencyError { .. }) => SurvivorError::Storage {
                message: err.to_string(),
            },
        }
    }
}

impl From<FeedError> for SurvivorError {
    fn from(err: FeedError) -> Self {
        SurvivorError::Fetch {
            message: err.to_string(),
        }
    }
}

impl From<SurvivorStateError> for SurvivorError {
    fn from(err: SurvivorStateError) -> Self {
        match err {
            SurvivorStateError::AlreadyInfected { id } => SurvivorError::AlreadyInfected { id },
        }
    }
}
