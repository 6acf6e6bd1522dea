//! Robot - A unit reported by the external robot feed
//!
//! Robots are read-only to Refuge. They are fetched per report,
//! never stored and never mutated.

/// A robot record as delivered by the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Robot {
    /// Model name
    pub model: String,
    /// Manufacturer serial number
    pub serial_number: String,
    /// Manufacture timestamp, RFC 3339
    pub manufactured_date: String,
    /// Land / Flying / ...
    pub category: String,
}
