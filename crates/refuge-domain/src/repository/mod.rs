//! Repository Traits - The "Ports" of Hexagonal Architecture
//!
//! These traits define HOW the domain wants to persist survivors,
//! but NOT how it's actually done. That's the adapter's job.
//!
//! ```text
//! Domain Layer             │  Adapter Layer
//! ─────────────────────────┼────────────────────────────
//! trait SurvivorRepository │  SqliteSurvivorRepository
//!   fn insert()            │  InMemorySurvivorRepository
//!   fn update_infection()  │
//! ```

pub mod survivor_repository;
