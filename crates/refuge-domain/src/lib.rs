//! # Refuge Domain Layer
//!
//! Survivors, the infection-report policy and situational reports.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/     - Survivor entity, value objects, views         ││
//! │  │  repository/- Persistence port (SurvivorRepository)         ││
//! │  │  port/      - Robot feed port (RobotFeed)                   ││
//! │  │  service/   - Report aggregation                            ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This crate has no external dependencies. SQL, HTTP and JSON belong to
//! `refuge-adapter`.

pub mod model;
pub mod port;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use model::{
    location::Location,
    report::Report,
    robot::Robot,
    survivor::{
        InfectionReport, NewSurvivor, Survivor, SurvivorId, SurvivorStateError,
        INFECTION_THRESHOLD, RESOURCE_DELIMITER,
    },
    view::SurvivorView,
};

pub use port::robot_feed::{FeedError, RobotFeed};

pub use repository::survivor_repository::{InfectionUpdate, RepositoryError, SurvivorRepository};

pub use service::report::build_report;
