//! In-Memory Repository Implementation
//!
//! Stores resources as a real list, so no delimiter rules apply here.
//! Useful for testing and for running without a database file.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use refuge_domain::{
    InfectionUpdate, Location, NewSurvivor, RepositoryError, Survivor, SurvivorId,
    SurvivorRepository,
};

#[derive(Debug, Default)]
struct Store {
    /// Keyed by id, so iteration order is insertion order
    survivors: BTreeMap<i64, Survivor>,
    last_id: i64,
}

/// In-memory Survivor Repository
///
/// Thread-safe implementation using RwLock. Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySurvivorRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemorySurvivorRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::default())),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Store>, RepositoryError> {
        self.store
            .read()
            .map_err(|_| RepositoryError::PersistenceError {
                message: "Failed to acquire read lock".to_string(),
            })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Store>, RepositoryError> {
        self.store
            .write()
            .map_err(|_| RepositoryError::PersistenceError {
                message: "Failed to acquire write lock".to_string(),
            })
    }
}

impl SurvivorRepository for InMemorySurvivorRepository {
    fn insert(&mut self, survivor: &NewSurvivor) -> Result<SurvivorId, RepositoryError> {
        let mut store = self.write()?;
        if store.survivors.values().any(|s| s.name() == survivor.name) {
            return Err(RepositoryError::DuplicateName {
                name: survivor.name.clone(),
            });
        }
        store.last_id += 1;
        let id = SurvivorId::new(store.last_id);
        store
            .survivors
            .insert(id.value(), Survivor::register(id, survivor.clone()));
        Ok(id)
    }

    fn find_by_id(&self, id: SurvivorId) -> Result<Option<Survivor>, RepositoryError> {
        Ok(self.read()?.survivors.get(&id.value()).cloned())
    }

    fn update_location(&mut self, id: SurvivorId, location: Location) -> Result<(), RepositoryError> {
        let mut store = self.write()?;
        let survivor = store
            .survivors
            .get_mut(&id.value())
            .ok_or(RepositoryError::NotFound { id })?;
        survivor.relocate(location);
        Ok(())
    }

    fn update_infection(
        &mut self,
        id: SurvivorId,
        update: &InfectionUpdate,
    ) -> Result<(), RepositoryError> {
        // check and write under one write lock
        let mut store = self.write()?;
        let survivor = store
            .survivors
            .get_mut(&id.value())
            .ok_or(RepositoryError::NotFound { id })?;

        if survivor.is_infected() || survivor.report_count() != update.expected_report_count {
            return Err(RepositoryError::ConcurrencyError { id });
        }

        let profile = NewSurvivor {
            name: survivor.name().to_string(),
            age: survivor.age(),
            gender: survivor.gender().to_string(),
            location: survivor.location(),
            resources: survivor.resources().to_vec(),
        };
        *survivor = Survivor::restore(id, profile, update.is_infected, update.report_count);
        Ok(())
    }

    fn delete(&mut self, id: SurvivorId) -> Result<(), RepositoryError> {
        self.write()?.survivors.remove(&id.value());
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Survivor>, RepositoryError> {
        Ok(self.read()?.survivors.values().cloned().collect())
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.read()?.survivors.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marlene() -> NewSurvivor {
        NewSurvivor::new("Marlene", 45, "F")
            .at(Location::new(39.95, -75.16))
            .with_resource("radio")
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let mut repo = InMemorySurvivorRepository::new();

        let a = repo.insert(&marlene()).unwrap();
        let b = repo.insert(&NewSurvivor::new("Riley", 16, "F")).unwrap();

        assert_eq!(a, SurvivorId::new(1));
        assert_eq!(b, SurvivorId::new(2));
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_duplicate_name() {
        let mut repo = InMemorySurvivorRepository::new();
        repo.insert(&marlene()).unwrap();

        let err = repo.insert(&marlene()).unwrap_err();

        assert_eq!(
            err,
            RepositoryError::DuplicateName {
                name: "Marlene".to_string()
            }
        );
    }

    #[test]
    fn test_clones_share_state() {
        let mut repo = InMemorySurvivorRepository::new();
        let other = repo.clone();

        let id = repo.insert(&marlene()).unwrap();

        assert!(other.find_by_id(id).unwrap().is_some());
    }

    #[test]
    fn test_update_location_missing() {
        let mut repo = InMemorySurvivorRepository::new();

        let err = repo
            .update_location(SurvivorId::new(8), Location::new(0.0, 0.0))
            .unwrap_err();

        assert_eq!(err, RepositoryError::NotFound { id: SurvivorId::new(8) });
    }

    #[test]
    fn test_update_infection_compare_and_swap() {
        let mut repo = InMemorySurvivorRepository::new();
        let id = repo.insert(&marlene()).unwrap();

        repo.update_infection(
            id,
            &InfectionUpdate {
                expected_report_count: 0,
                report_count: 1,
                is_infected: false,
            },
        )
        .unwrap();

        // a second writer that also observed 0 loses
        let err = repo
            .update_infection(
                id,
                &InfectionUpdate {
                    expected_report_count: 0,
                    report_count: 1,
                    is_infected: false,
                },
            )
            .unwrap_err();

        assert_eq!(err, RepositoryError::ConcurrencyError { id });
        let stored = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(stored.report_count(), 1);
        assert_eq!(stored.resources(), ["radio".to_string()]);
    }
}
