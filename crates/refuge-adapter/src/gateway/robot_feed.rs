//! Robot feed clients
//!
//! [`HttpRobotFeed`] pulls the robot list over HTTP. The feed answers with
//! a JSON array:
//!
//! ```json
//! [{"model": "...", "serialNumber": "...", "manufacturedDate": "2021-09-03T11:04:17Z", "category": "Land"}]
//! ```
//!
//! Timestamps are normalized to RFC 3339 UTC. Timestamps without an offset
//! are taken as UTC.

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use refuge_domain::{FeedError, Robot, RobotFeed};

pub const DEFAULT_ROBOT_FEED_URL: &str =
    "https://robotstakeover20210903110417.azurewebsites.net/robotcpu";

/// Wire shape of one robot
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RobotRecord {
    model: String,
    serial_number: String,
    manufactured_date: String,
    category: String,
}

impl RobotRecord {
    fn into_robot(self) -> Result<Robot, FeedError> {
        let manufactured = parse_timestamp(&self.manufactured_date).ok_or_else(|| {
            FeedError::Malformed {
                message: format!(
                    "robot {} has invalid manufacturedDate '{}'",
                    self.serial_number, self.manufactured_date
                ),
            }
        })?;

        Ok(Robot {
            model: self.model,
            serial_number: self.serial_number,
            manufactured_date: manufactured.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            category: self.category,
        })
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Decode a feed payload into domain robots.
pub fn decode_robots(body: &[u8]) -> Result<Vec<Robot>, FeedError> {
    let records: Vec<RobotRecord> =
        serde_json::from_slice(body).map_err(|e| FeedError::Malformed {
            message: e.to_string(),
        })?;

    records.into_iter().map(RobotRecord::into_robot).collect()
}

/// Robot feed over HTTP
#[derive(Debug, Clone)]
pub struct HttpRobotFeed {
    client: reqwest::Client,
    url: String,
}

impl HttpRobotFeed {
    /// Create a client for `url`. Every request is bounded by `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RobotFeed for HttpRobotFeed {
    async fn fetch_robots(&self) -> Result<Vec<Robot>, FeedError> {
        debug!(url = %self.url, "Fetching robots");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FeedError::Unreachable {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, %status, "Robot feed rejected request");
            return Err(FeedError::Status {
                code: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FeedError::Unreachable {
            message: e.to_string(),
        })?;

        let robots = decode_robots(&body)?;
        info!(count = robots.len(), "Fetched robots");
        Ok(robots)
    }
}

/// Feed that always answers with the same robots
#[derive(Debug, Clone, Default)]
pub struct StaticRobotFeed {
    robots: Vec<Robot>,
}

impl StaticRobotFeed {
    pub fn new(robots: Vec<Robot>) -> Self {
        Self { robots }
    }
}

impl RobotFeed for StaticRobotFeed {
    async fn fetch_robots(&self) -> Result<Vec<Robot>, FeedError> {
        Ok(self.robots.clone())
    }
}
