//! Outbound Adapters - External data sources
//!
//! These implement `RobotFeed` from refuge-domain.

pub mod robot_feed;

pub use robot_feed::{HttpRobotFeed, StaticRobotFeed, DEFAULT_ROBOT_FEED_URL};
