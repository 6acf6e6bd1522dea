//! # Refuge Adapter Layer
//!
//! External system integrations (Hexagonal Architecture adapters).
//!
//! ## Structure
//!
//! - `controller/` - Inbound adapter (HTTP, axum)
//! - `gateway/` - Outbound adapters (robot feed client)
//! - `repository/` - Persistence implementations (SQLite, in-memory)

pub mod controller;
pub mod gateway;
pub mod repository;
