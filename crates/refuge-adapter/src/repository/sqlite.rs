//! SQLite Survivor Repository
//!
//! One `survivors` table, created on open if missing:
//!
//! | column        | type    | notes                              |
//! |---------------|---------|------------------------------------|
//! | `id`          | INTEGER | primary key, assigned by SQLite    |
//! | `name`        | TEXT    | NOT NULL UNIQUE                    |
//! | `age`         | INTEGER |                                    |
//! | `gender`      | TEXT    |                                    |
//! | `latitude`    | REAL    |                                    |
//! | `longitude`   | REAL    |                                    |
//! | `resources`   | TEXT    | comma-joined, see [`super::resources`] |
//! | `is_infected` | INTEGER | 0 / 1                              |
//! | `reported`    | INTEGER | infection report count             |
//!
//! All statements run under a single connection mutex, which gives every
//! port call the atomicity the domain requires.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use thiserror::Error;
use tracing::{debug, info};

use refuge_domain::{
    InfectionUpdate, Location, NewSurvivor, RepositoryError, Survivor, SurvivorId,
    SurvivorRepository,
};

use super::resources;

const SURVIVORS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS survivors (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL UNIQUE,
    age         INTEGER NOT NULL,
    gender      TEXT    NOT NULL,
    latitude    REAL    NOT NULL,
    longitude   REAL    NOT NULL,
    resources   TEXT    NOT NULL,
    is_infected INTEGER NOT NULL DEFAULT 0,
    reported    INTEGER NOT NULL DEFAULT 0
);
"#;

const SELECT_COLUMNS: &str =
    "id, name, age, gender, latitude, longitude, resources, is_infected, reported";

/// Errors raised while opening the database
#[derive(Debug, Error)]
pub enum SqliteError {
    #[error("failed to open SQLite database at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to create survivors table: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("failed to close SQLite database: {0}")]
    Close(#[source] rusqlite::Error),

    #[error("connection lock poisoned")]
    LockPoisoned,
}

/// SQLite-backed Survivor Repository
///
/// Cheap to clone; clones share the connection.
#[derive(Debug, Clone)]
pub struct SqliteSurvivorRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSurvivorRepository {
    /// Open or create the database file
    pub fn open(path: &Path) -> Result<Self, SqliteError> {
        info!("Opening SQLite database at {:?}", path);

        let conn = Connection::open(path).map_err(|source| SqliteError::Open {
            path: path.display().to_string(),
            source,
        })?;

        Self::with_connection(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self, SqliteError> {
        debug!("Opening in-memory SQLite database");

        let conn = Connection::open_in_memory().map_err(|source| SqliteError::Open {
            path: ":memory:".to_string(),
            source,
        })?;

        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, SqliteError> {
        conn.execute_batch(SURVIVORS_SCHEMA)
            .map_err(SqliteError::Schema)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Release the connection if this is the last handle.
    ///
    /// Other clones keep the connection alive; it closes when the last
    /// one is dropped.
    pub fn close(self) -> Result<(), SqliteError> {
        match Arc::try_unwrap(self.conn) {
            Ok(mutex) => {
                let conn = mutex.into_inner().map_err(|_| SqliteError::LockPoisoned)?;
                conn.close().map_err(|(_, source)| SqliteError::Close(source))?;
                info!("SQLite connection closed");
            }
            Err(_) => debug!("SQLite connection still shared, leaving it open"),
        }
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, RepositoryError> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::PersistenceError {
                message: format!("Lock poisoned: {}", e),
            })
    }
}

fn persistence(err: rusqlite::Error) -> RepositoryError {
    RepositoryError::PersistenceError {
        message: err.to_string(),
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

fn survivor_from_row(row: &Row) -> Result<Survivor, rusqlite::Error> {
    let resources: String = row.get("resources")?;
    let profile = NewSurvivor {
        name: row.get("name")?,
        age: row.get("age")?,
        gender: row.get("gender")?,
        location: Location::new(row.get("latitude")?, row.get("longitude")?),
        resources: resources::decode(&resources),
    };
    Ok(Survivor::restore(
        SurvivorId::new(row.get("id")?),
        profile,
        row.get("is_infected")?,
        row.get("reported")?,
    ))
}

impl SurvivorRepository for SqliteSurvivorRepository {
    fn insert(&mut self, survivor: &NewSurvivor) -> Result<SurvivorId, RepositoryError> {
        let encoded = resources::encode(&survivor.resources)?;
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO survivors (name, age, gender, latitude, longitude, resources, is_infected, reported)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, 0)",
            params![
                survivor.name,
                survivor.age,
                survivor.gender,
                survivor.location.latitude,
                survivor.location.longitude,
                encoded,
            ],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                RepositoryError::DuplicateName {
                    name: survivor.name.clone(),
                }
            } else {
                persistence(e)
            }
        })?;

        let id = SurvivorId::new(conn.last_insert_rowid());
        debug!(survivor_id = %id, "Inserted survivor");
        Ok(id)
    }

    fn find_by_id(&self, id: SurvivorId) -> Result<Option<Survivor>, RepositoryError> {
        let conn = self.lock()?;
        conn.query_row(
            &format!("SELECT {} FROM survivors WHERE id = ?1", SELECT_COLUMNS),
            params![id.value()],
            survivor_from_row,
        )
        .optional()
        .map_err(persistence)
    }

    fn update_location(&mut self, id: SurvivorId, location: Location) -> Result<(), RepositoryError> {
        let conn = self.lock()?;
        let changed = conn
            .execute(
                "UPDATE survivors SET latitude = ?1, longitude = ?2 WHERE id = ?3",
                params![location.latitude, location.longitude, id.value()],
            )
            .map_err(persistence)?;

        if changed == 0 {
            return Err(RepositoryError::NotFound { id });
        }
        Ok(())
    }

    fn update_infection(
        &mut self,
        id: SurvivorId,
        update: &InfectionUpdate,
    ) -> Result<(), RepositoryError> {
        let conn = self.lock()?;
        let changed = conn
            .execute(
                "UPDATE survivors SET is_infected = ?1, reported = ?2
                 WHERE id = ?3 AND reported = ?4 AND is_infected = 0",
                params![
                    update.is_infected,
                    update.report_count,
                    id.value(),
                    update.expected_report_count,
                ],
            )
            .map_err(persistence)?;

        if changed == 0 {
            let exists = conn
                .query_row(
                    "SELECT 1 FROM survivors WHERE id = ?1",
                    params![id.value()],
                    |_| Ok(()),
                )
                .optional()
                .map_err(persistence)?
                .is_some();

            return Err(if exists {
                RepositoryError::ConcurrencyError { id }
            } else {
                RepositoryError::NotFound { id }
            });
        }
        Ok(())
    }

    fn delete(&mut self, id: SurvivorId) -> Result<(), RepositoryError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM survivors WHERE id = ?1", params![id.value()])
            .map_err(persistence)?;
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Survivor>, RepositoryError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!("SELECT {} FROM survivors ORDER BY id", SELECT_COLUMNS))
            .map_err(persistence)?;

        let rows = stmt
            .query_map([], survivor_from_row)
            .map_err(persistence)?;

        let survivors = rows.collect::<Result<Vec<_>, _>>().map_err(persistence)?;
        Ok(survivors)
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM survivors", [], |row| row.get(0))
            .map_err(persistence)?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dina() -> NewSurvivor {
        NewSurvivor::new("Dina", 19, "F")
            .at(Location::new(47.61, -122.33))
            .with_resource("water")
            .with_resource("rope")
    }

    #[test]
    fn test_insert_and_fetch_round_trip() {
        let mut repo = SqliteSurvivorRepository::open_in_memory().unwrap();

        let id = repo.insert(&dina()).unwrap();
        let found = repo.find_by_id(id).unwrap().unwrap();

        assert_eq!(found, Survivor::register(id, dina()));
        assert_eq!(found.resources(), ["water".to_string(), "rope".to_string()]);
    }

    #[test]
    fn test_missing_id() {
        let repo = SqliteSurvivorRepository::open_in_memory().unwrap();
        assert!(repo.find_by_id(SurvivorId::new(1)).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_name() {
        let mut repo = SqliteSurvivorRepository::open_in_memory().unwrap();
        repo.insert(&dina()).unwrap();

        let err = repo.insert(&dina()).unwrap_err();

        assert_eq!(
            err,
            RepositoryError::DuplicateName {
                name: "Dina".to_string()
            }
        );
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_delimiter_refused_before_insert() {
        let mut repo = SqliteSurvivorRepository::open_in_memory().unwrap();

        let err = repo.insert(&dina().with_resource("a,b")).unwrap_err();

        assert!(matches!(err, RepositoryError::InvalidRecord { .. }));
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_empty_resources_round_trip() {
        let mut repo = SqliteSurvivorRepository::open_in_memory().unwrap();

        let id = repo.insert(&NewSurvivor::new("Jesse", 24, "M")).unwrap();

        assert!(repo.find_by_id(id).unwrap().unwrap().resources().is_empty());
    }

    #[test]
    fn test_update_location() {
        let mut repo = SqliteSurvivorRepository::open_in_memory().unwrap();
        let id = repo.insert(&dina()).unwrap();

        repo.update_location(id, Location::new(-1.0, 2.5)).unwrap();

        let found = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(found.location(), Location::new(-1.0, 2.5));
        assert_eq!(found.name(), "Dina");
    }

    #[test]
    fn test_update_location_missing() {
        let mut repo = SqliteSurvivorRepository::open_in_memory().unwrap();

        let err = repo
            .update_location(SurvivorId::new(12), Location::new(0.0, 0.0))
            .unwrap_err();

        assert_eq!(err, RepositoryError::NotFound { id: SurvivorId::new(12) });
    }

    #[test]
    fn test_update_infection_compare_and_swap() {
        let mut repo = SqliteSurvivorRepository::open_in_memory().unwrap();
        let id = repo.insert(&dina()).unwrap();
        let update = InfectionUpdate {
            expected_report_count: 0,
            report_count: 1,
            is_infected: false,
        };

        repo.update_infection(id, &update).unwrap();
        let err = repo.update_infection(id, &update).unwrap_err();

        assert_eq!(err, RepositoryError::ConcurrencyError { id });
        assert_eq!(repo.find_by_id(id).unwrap().unwrap().report_count(), 1);
    }

    #[test]
    fn test_update_infection_sets_flag() {
        let mut repo = SqliteSurvivorRepository::open_in_memory().unwrap();
        let id = repo.insert(&dina()).unwrap();

        repo.update_infection(
            id,
            &InfectionUpdate {
                expected_report_count: 0,
                report_count: 3,
                is_infected: true,
            },
        )
        .unwrap();

        let found = repo.find_by_id(id).unwrap().unwrap();
        assert!(found.is_infected());
        assert_eq!(found.report_count(), 3);
    }

    #[test]
    fn test_update_infection_missing() {
        let mut repo = SqliteSurvivorRepository::open_in_memory().unwrap();
        let update = InfectionUpdate {
            expected_report_count: 0,
            report_count: 1,
            is_infected: false,
        };

        let err = repo
            .update_infection(SurvivorId::new(4), &update)
            .unwrap_err();

        assert_eq!(err, RepositoryError::NotFound { id: SurvivorId::new(4) });
    }

    #[test]
    fn test_delete_and_list() {
        let mut repo = SqliteSurvivorRepository::open_in_memory().unwrap();
        let a = repo.insert(&dina()).unwrap();
        let b = repo.insert(&NewSurvivor::new("Lev", 13, "M")).unwrap();

        repo.delete(a).unwrap();

        let all = repo.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id(), b);
    }

    #[test]
    fn test_data_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("refuge.db");

        let id = {
            let mut repo = SqliteSurvivorRepository::open(&path).unwrap();
            let id = repo.insert(&dina()).unwrap();
            repo.close().unwrap();
            id
        };

        let repo = SqliteSurvivorRepository::open(&path).unwrap();
        let found = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(found.name(), "Dina");
        assert_eq!(found.resources(), ["water".to_string(), "rope".to_string()]);
    }
}
