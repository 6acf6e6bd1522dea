//! Report - Situational snapshot computed on demand
//!
//! Never persisted. See [`crate::service::report::build_report`].

use super::robot::Robot;
use super::view::SurvivorView;

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// NaN when there are no survivors
    pub percentage_infected: f64,
    /// NaN when there are no survivors
    pub percentage_non_infected: f64,
    pub infected: Vec<SurvivorView>,
    pub non_infected: Vec<SurvivorView>,
    pub robots: Vec<Robot>,
}

impl Report {
    pub fn total_survivors(&self) -> usize {
        self.infected.len() + self.non_infected.len()
    }
}
