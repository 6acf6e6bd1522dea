//! # Refuge Use Case Layer
//!
//! Application-specific business rules.
//! Each use case takes its ports as arguments; nothing here holds state.
//!
//! - [`survivors`] - create, fetch, relocate, delete, list, flag infection
//! - [`report`] - situational report (survivors + robot feed)

pub mod error;
pub mod report;
pub mod survivors;

#[cfg(test)]
pub(crate) mod testing;

pub use refuge_domain;

pub use error::SurvivorError;
pub use report::generate_report;
pub use survivors::{create, delete, fetch, flag_infection, list_all, update_location};
