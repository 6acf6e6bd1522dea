//! Test doubles for the domain ports

use std::collections::BTreeMap;

use refuge_domain::{
    FeedError, InfectionUpdate, Location, NewSurvivor, RepositoryError, Robot, RobotFeed,
    Survivor, SurvivorId, SurvivorRepository,
};

/// In-memory repository that counts successful writes.
pub struct FakeRepository {
    survivors: BTreeMap<i64, Survivor>,
    next_id: i64,
    mutations: usize,
    interleave_report: bool,
    fail_list: bool,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self {
            survivors: BTreeMap::new(),
            next_id: 1,
            mutations: 0,
            interleave_report: false,
            fail_list: false,
        }
    }

    pub fn mutations(&self) -> usize {
        self.mutations
    }

    /// Simulate another writer reporting the same survivor between our
    /// read and our write.
    pub fn interleave_report_before_next_update(&mut self) {
        self.interleave_report = true;
    }

    pub fn fail_listing(&mut self) {
        self.fail_list = true;
    }
}

impl SurvivorRepository for FakeRepository {
    fn insert(&mut self, survivor: &NewSurvivor) -> Result<SurvivorId, RepositoryError> {
        if self.survivors.values().any(|s| s.name() == survivor.name) {
            return Err(RepositoryError::DuplicateName {
                name: survivor.name.clone(),
            });
        }
        let id = SurvivorId::new(self.next_id);
        self.next_id += 1;
        self.survivors
            .insert(id.value(), Survivor::register(id, survivor.clone()));
        self.mutations += 1;
        Ok(id)
    }

    fn find_by_id(&self, id: SurvivorId) -> Result<Option<Survivor>, RepositoryError> {
        Ok(self.survivors.get(&id.value()).cloned())
    }

    fn update_location(&mut self, id: SurvivorId, location: Location) -> Result<(), RepositoryError> {
        let survivor = self
            .survivors
            .get_mut(&id.value())
            .ok_or(RepositoryError::NotFound { id })?;
        survivor.relocate(location);
        self.mutations += 1;
        Ok(())
    }

    fn update_infection(
        &mut self,
        id: SurvivorId,
        update: &InfectionUpdate,
    ) -> Result<(), RepositoryError> {
        let survivor = self
            .survivors
            .get_mut(&id.value())
            .ok_or(RepositoryError::NotFound { id })?;

        if std::mem::take(&mut self.interleave_report) {
            let _ = survivor.report_infection();
        }

        if survivor.report_count() != update.expected_report_count || survivor.is_infected() {
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
        self.mutations += 1;
        Ok(())
    }

    fn delete(&mut self, id: SurvivorId) -> Result<(), RepositoryError> {
        self.survivors.remove(&id.value());
        self.mutations += 1;
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Survivor>, RepositoryError> {
        if self.fail_list {
            return Err(RepositoryError::PersistenceError {
                message: "disk on fire".to_string(),
            });
        }
        Ok(self.survivors.values().cloned().collect())
    }
}

/// Feed that returns a canned answer.
pub struct FakeFeed {
    answer: Result<Vec<Robot>, FeedError>,
}

impl FakeFeed {
    pub fn robots(robots: Vec<Robot>) -> Self {
        Self { answer: Ok(robots) }
    }

    pub fn failing(err: FeedError) -> Self {
        Self { answer: Err(err) }
    }
}

impl RobotFeed for FakeFeed {
    async fn fetch_robots(&self) -> Result<Vec<Robot>, FeedError> {
        self.answer.clone()
    }
}
