//! Survivor use cases
//!
//! Every operation receives the persistence port explicitly. The port is
//! expected to make each call atomic; `flag_infection` additionally relies
//! on the compare-and-swap contract of `update_infection`.

use refuge_domain::{
    InfectionReport, InfectionUpdate, Location, NewSurvivor, Survivor, SurvivorId,
    SurvivorRepository, RESOURCE_DELIMITER,
};

use crate::error::SurvivorError;

/// Register a new survivor and return the id storage assigned.
pub fn create<R: SurvivorRepository>(
    repo: &mut R,
    survivor: NewSurvivor,
) -> Result<SurvivorId, SurvivorError> {
    validate_new(&survivor)?;
    Ok(repo.insert(&survivor)?)
}

/// Fetch one survivor.
pub fn fetch<R: SurvivorRepository>(repo: &R, id: SurvivorId) -> Result<Survivor, SurvivorError> {
    repo.find_by_id(id)?.ok_or(SurvivorError::NotFound { id })
}

/// Overwrite a survivor's location.
///
/// A missing id is reported as `NotFound` rather than silently ignored.
pub fn update_location<R: SurvivorRepository>(
    repo: &mut R,
    id: SurvivorId,
    location: Location,
) -> Result<(), SurvivorError> {
    validate_location(&location)?;
    Ok(repo.update_location(id, location)?)
}

/// Delete a survivor. `NotFound` (and no mutation) if it does not exist.
pub fn delete<R: SurvivorRepository>(repo: &mut R, id: SurvivorId) -> Result<(), SurvivorError> {
    fetch(repo, id)?;
    Ok(repo.delete(id)?)
}

/// Every survivor, in storage order. Empty storage is not an error.
pub fn list_all<R: SurvivorRepository>(repo: &R) -> Result<Vec<Survivor>, SurvivorError> {
    Ok(repo.list_all()?)
}

/// Record one infection report against a survivor.
///
/// The third report marks the survivor infected. Reports against an
/// infected survivor fail with `AlreadyInfected` and change nothing.
/// Infection count and flag are written together, conditioned on the
/// count read here; a concurrent writer makes this call fail with
/// `Storage` instead of overshooting the threshold.
pub fn flag_infection<R: SurvivorRepository>(
    repo: &mut R,
    id: SurvivorId,
) -> Result<InfectionReport, SurvivorError> {
    let mut survivor = fetch(repo, id)?;
    let report = survivor.report_infection()?;

    repo.update_infection(
        id,
        &InfectionUpdate {
            expected_report_count: report.previous_report_count,
            report_count: report.report_count,
            is_infected: survivor.is_infected(),
        },
    )?;

    Ok(report)
}

fn validate_new(survivor: &NewSurvivor) -> Result<(), SurvivorError> {
    if survivor.name.trim().is_empty() {
        return Err(SurvivorError::validation("name must not be empty"));
    }
    if survivor.resources.iter().any(|r| r.is_empty()) {
        return Err(SurvivorError::validation("resource tags must not be empty"));
    }
    if let Some(bad) = survivor
        .resources
        .iter()
        .find(|r| r.contains(RESOURCE_DELIMITER))
    {
        return Err(SurvivorError::validation(format!(
            "resource '{}' must not contain '{}'",
            bad, RESOURCE_DELIMITER
        )));
    }
    validate_location(&survivor.location)
}

fn validate_location(location: &Location) -> Result<(), SurvivorError> {
    if !location.latitude.is_finite() || !location.longitude.is_finite() {
        return Err(SurvivorError::validation(format!(
            "location {} is not a finite coordinate pair",
            location
        )));
    }
    Ok(())
}
