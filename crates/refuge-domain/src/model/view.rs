//! SurvivorView - The externally visible shape of a survivor
//!
//! Projection rules: `report_count` is dropped, latitude and longitude
//! travel together as `last_known_location`, everything else passes through.

use super::location::Location;
use super::survivor::{Survivor, SurvivorId};

#[derive(Debug, Clone, PartialEq)]
pub struct SurvivorView {
    pub id: SurvivorId,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub last_known_location: Location,
    pub resources: Vec<String>,
    pub is_infected: bool,
}

impl From<&Survivor> for SurvivorView {
    fn from(s: &Survivor) -> Self {
        Self {
            id: s.id(),
            name: s.name().to_string(),
            age: s.age(),
            gender: s.gender().to_string(),
            last_known_location: s.location(),
            resources: s.resources().to_vec(),
            is_infected: s.is_infected(),
        }
    }
}

impl From<Survivor> for SurvivorView {
    fn from(s: Survivor) -> Self {
        Self::from(&s)
    }
}
