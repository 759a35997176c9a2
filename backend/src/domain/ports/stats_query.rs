//! Driving port for usage statistics reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, QuestionStats, QuestionStatsDto};

/// Response containing the service-wide statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetStatsResponse {
    pub stats: QuestionStatsDto,
}

/// Request for one recipient's statistics.
///
/// The handle may carry a leading `@`, which is stripped before lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetHandleStatsRequest {
    pub handle: String,
}

/// Driving port for statistics reads.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), askbox_backend::domain::Error> {
/// use askbox_backend::domain::ports::{FixtureStatsQuery, StatsQuery};
///
/// let query = FixtureStatsQuery;
/// let response = query.global_stats().await?;
/// assert_eq!(response.stats.asked_count, 0);
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsQuery: Send + Sync {
    /// Service-wide counters over every stored question.
    async fn global_stats(&self) -> Result<GetStatsResponse, Error>;

    /// Counters scoped to one recipient handle.
    ///
    /// An unknown handle yields the zero-question aggregate, not an error.
    async fn handle_stats(&self, request: GetHandleStatsRequest)
    -> Result<GetStatsResponse, Error>;
}

/// Fixture query reporting the zero-question aggregate.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStatsQuery;

#[async_trait]
impl StatsQuery for FixtureStatsQuery {
    async fn global_stats(&self) -> Result<GetStatsResponse, Error> {
        Ok(GetStatsResponse {
            stats: QuestionStats::empty().into(),
        })
    }

    async fn handle_stats(
        &self,
        _request: GetHandleStatsRequest,
    ) -> Result<GetStatsResponse, Error> {
        Ok(GetStatsResponse {
            stats: QuestionStats::empty().into(),
        })
    }
}
