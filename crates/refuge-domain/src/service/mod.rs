//! Domain Services - Logic that spans entities
//!
//! Pure functions only: no I/O, no async.

pub mod report;
