//! Report Aggregator - Turns survivors and robots into a Report
//!
//! 1. Partition: infected vs. not infected, one pass, order preserved
//! 2. Measure: share of each partition, in percent
//! 3. Project: survivors become [`SurvivorView`]s
//! 4. Attach: the robot list, untouched
//!
//! The aggregator never fetches anything itself. Callers hand it the
//! survivor list and the robot list.

use crate::model::report::Report;
use crate::model::robot::Robot;
use crate::model::survivor::Survivor;
use crate::model::view::SurvivorView;

/// Build a report from a survivor snapshot and a robot list.
///
/// With no survivors both percentages are NaN (0 / 0). That is left
/// as-is so callers can tell "no data" apart from "0 %".
pub fn build_report(survivors: &[Survivor], robots: Vec<Robot>) -> Report {
    let (infected, non_infected): (Vec<SurvivorView>, Vec<SurvivorView>) = survivors
        .iter()
        .map(SurvivorView::from)
        .partition(|view| view.is_infected);

    let total = survivors.len();

    Report {
        percentage_infected: percentage(infected.len(), total),
        percentage_non_infected: percentage(non_infected.len(), total),
        infected,
        non_infected,
        robots,
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    (part as f64 * 100.0) / total as f64
}
