use async_trait::async_trait;

use crate::db::models::{Match, Team};
use crate::error::FetchError;
use crate::stats::FilterSpec;

/// Trait that every match data source must implement.
#[async_trait]
pub trait MatchSource: Send + Sync {
    /// All teams known to the source.
    async fn fetch_teams(&self) -> Result<Vec<Team>, FetchError>;

    /// Matches satisfying `filter`, in the source's natural order.
    async fn fetch_matches(&self, filter: &FilterSpec) -> Result<Vec<Match>, FetchError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
