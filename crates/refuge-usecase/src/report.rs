//! Report use case - survivors from storage, robots from the feed

use refuge_domain::{build_report, Report, RobotFeed, SurvivorRepository};

use crate::error::SurvivorError;
use crate::survivors::list_all;

/// Build the situational report.
///
/// Storage is read first; a feed failure aborts the whole report.
pub async fn generate_report<R, F>(repo: &R, feed: &F) -> Result<Report, SurvivorError>
where
    R: SurvivorRepository + Sync,
    F: RobotFeed + Sync,
{
    let survivors = list_all(repo)?;
    let robots = feed.fetch_robots().await?;
    Ok(build_report(&survivors, robots))
}
