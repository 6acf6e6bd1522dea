//! Persistence Adapters - Repository implementations
//!
//! These implement `SurvivorRepository` from refuge-domain.

pub mod in_memory;
pub mod resources;
pub mod sqlite;

pub use in_memory::InMemorySurvivorRepository;
pub use sqlite::{SqliteError, SqliteSurvivorRepository};
