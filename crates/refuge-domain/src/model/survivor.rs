//! Survivor - A tracked individual
//!
//! A Survivor is an Entity: the id assigned by storage identifies it
//! for its whole life, while location and infection status change.
//!
//! ```text
//!   Healthy(0) ──report──▶ Healthy(1) ──report──▶ Healthy(2) ──report──▶ Infected(3)
//!                                                                           │
//!                                                            report ──▶ AlreadyInfected
//! ```

use super::location::Location;

/// Number of accumulated infection reports that marks a survivor infected.
pub const INFECTION_THRESHOLD: u32 = 3;

/// Separator of the flat resources column. Resource tags may not contain it.
pub const RESOURCE_DELIMITER: char = ',';

/// Storage-assigned identifier for a Survivor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurvivorId(i64);

impl SurvivorId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for SurvivorId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything a caller supplies when registering a survivor.
///
/// Infection status and report count are not part of it: every new
/// survivor starts healthy with zero reports.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSurvivor {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub location: Location,
    pub resources: Vec<String>,
}

impl NewSurvivor {
    pub fn new(name: impl Into<String>, age: u32, gender: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            gender: gender.into(),
            location: Location::default(),
            resources: Vec::new(),
        }
    }

    /// Builder: set the location
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Builder: add a resource
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resources.push(resource.into());
        self
    }
}

/// Outcome of a successful infection report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfectionReport {
    /// Count observed before this report
    pub previous_report_count: u32,
    /// Count after this report
    pub report_count: u32,
    /// True when this report crossed the threshold
    pub became_infected: bool,
}

/// Survivor - The central entity of Refuge
#[derive(Debug, Clone, PartialEq)]
pub struct Survivor {
    id: SurvivorId,
    name: String,
    age: u32,
    gender: String,
    location: Location,
    resources: Vec<String>,
    is_infected: bool,
    /// Internal only, never projected outward
    report_count: u32,
}

impl Survivor {
    /// A freshly registered survivor: healthy, no reports.
    pub fn register(id: SurvivorId, new: NewSurvivor) -> Self {
        Self::restore(id, new, false, 0)
    }

    /// Rebuild a survivor from stored state.
    pub fn restore(id: SurvivorId, profile: NewSurvivor, is_infected: bool, report_count: u32) -> Self {
        Self {
            id,
            name: profile.name,
            age: profile.age,
            gender: profile.gender,
            location: profile.location,
            resources: profile.resources,
            is_infected,
            report_count,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> SurvivorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    pub fn is_infected(&self) -> bool {
        self.is_infected
    }

    pub fn report_count(&self) -> u32 {
        self.report_count
    }

    // ========== Mutations ==========

    /// Move the survivor. Nothing else changes.
    pub fn relocate(&mut self, location: Location) {
        self.location = location;
    }

    // ========== State Transitions ==========

    /// Record one infection report against this survivor.
    ///
    /// Infected survivors reject further reports without changing state.
    pub fn report_infection(&mut self) -> Result<InfectionReport, SurvivorStateError> {
        if self.is_infected {
            return Err(SurvivorStateError::AlreadyInfected { id: self.id });
        }

        let previous_report_count = self.report_count;
        self.report_count = previous_report_count.saturating_add(1);
        if self.report_count >= INFECTION_THRESHOLD {
            self.is_infected = true;
        }

        Ok(InfectionReport {
            previous_report_count,
            report_count: self.report_count,
            became_infected: self.is_infected,
        })
    }
}

/// Errors that can occur during Survivor state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurvivorStateError {
    AlreadyInfected { id: SurvivorId },
}

impl core::fmt::Display for SurvivorStateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SurvivorStateError::AlreadyInfected { id } => {
                write!(f, "Survivor {} is already infected", id)
            }
        }
    }
}
