//! Domain Models - The vocabulary of Refuge
//!
//! `Survivor` is the only entity. Everything else is a value object
//! or a derived view.

pub mod location;
pub mod report;
pub mod robot;
pub mod survivor;
pub mod view;
