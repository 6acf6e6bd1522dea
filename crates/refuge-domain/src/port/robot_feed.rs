//! Robot Feed - Abstract source of robot records

use crate::model::robot::Robot;

/// Errors raised by a robot feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// The feed could not be reached (DNS, connect, timeout)
    Unreachable { message: String },
    /// The feed answered with a non-success status
    Status { code: u16 },
    /// The payload could not be decoded
    Malformed { message: String },
}

impl core::fmt::Display for FeedError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FeedError::Unreachable { message } => {
                write!(f, "Robot feed unreachable: {}", message)
            }
            FeedError::Status { code } => {
                write!(f, "Robot feed returned status {}", code)
            }
            FeedError::Malformed { message } => {
                write!(f, "Robot feed payload malformed: {}", message)
            }
        }
    }
}

/// Robot Feed Port
///
/// Async because every real implementation does network I/O.
/// Implementations own their deadlines; callers never retry.
pub trait RobotFeed {
    /// Fetch the current list of robots
    fn fetch_robots(
        &self,
    ) -> impl core::future::Future<Output = Result<Vec<Robot>, FeedError>> + Send;
}
