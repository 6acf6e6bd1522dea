//! Port definitions for external data sources.
//!
//! The robot feed is read-only and lives outside Refuge; reports merge
//! whatever it returns. Adapters (HTTP client, fixtures) implement the port.

pub mod robot_feed;
