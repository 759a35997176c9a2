//! Statistics domain service.
//!
//! Implements the statistics read port over the question repository's
//! aggregate queries.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    GetHandleStatsRequest, GetStatsResponse, QuestionPersistenceError, QuestionRepository,
    StatsQuery,
};
use crate::domain::{Error, Handle};

fn map_repository_error(error: QuestionPersistenceError) -> Error {
    match error {
        QuestionPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("question repository unavailable: {message}"))
        }
        QuestionPersistenceError::Query { message } => {
            Error::internal(format!("question repository error: {message}"))
        }
    }
}

/// Statistics service implementing the statistics read port.
#[derive(Clone)]
pub struct StatsQueryService<Q> {
    question_repo: Arc<Q>,
}

impl<Q> StatsQueryService<Q> {
    /// Create a new statistics service over the question repository.
    pub fn new(question_repo: Arc<Q>) -> Self {
        Self { question_repo }
    }
}

#[async_trait]
impl<Q> StatsQuery for StatsQueryService<Q>
where
    Q: QuestionRepository,
{
    async fn global_stats(&self) -> Result<GetStatsResponse, Error> {
        let totals = self
            .question_repo
            .usage_totals()
            .await
            .map_err(map_repository_error)?;

        Ok(GetStatsResponse {
            stats: totals.into(),
        })
    }

    async fn handle_stats(
        &self,
        request: GetHandleStatsRequest,
    ) -> Result<GetStatsResponse, Error> {
        let handle = Handle::parse_lenient(&request.handle)
            .map_err(|err| Error::invalid_request(format!("invalid handle: {err}")))?;
        let totals = self
            .question_repo
            .usage_totals_for_handle(&handle)
            .await
            .map_err(map_repository_error)?;

        Ok(GetStatsResponse {
            stats: totals.into(),
        })
    }
}

#[cfg(test)]
#[path = "stats_service_tests.rs"]
mod tests;
