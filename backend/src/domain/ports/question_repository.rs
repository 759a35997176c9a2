//! Port for question persistence and aggregate reads.

use async_trait::async_trait;

use crate::domain::{
    AccountId, Handle, Question, QuestionContent, QuestionId, QuestionStats,
    QuestionWithRecipient,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by question repository adapters.
    pub enum QuestionPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "question repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "question repository query failed: {message}",
    }
}

/// Port for storing questions and reading listings and aggregates.
///
/// Listings pair every question with its recipient account and order by
/// submission time, identifier as tiebreak, so repeated reads are stable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Persist a new question addressed to `recipient` and return the stored
    /// row, identifier and submission time included.
    async fn insert(
        &self,
        content: &QuestionContent,
        recipient: &AccountId,
    ) -> Result<Question, QuestionPersistenceError>;

    /// List every stored question with its recipient.
    async fn list_all(&self) -> Result<Vec<QuestionWithRecipient>, QuestionPersistenceError>;

    /// List the questions addressed to `handle`, with the recipient attached.
    async fn list_for_handle(
        &self,
        handle: &Handle,
    ) -> Result<Vec<QuestionWithRecipient>, QuestionPersistenceError>;

    /// Report whether a question with this identifier is stored.
    async fn exists(&self, id: &QuestionId) -> Result<bool, QuestionPersistenceError>;

    /// Aggregate counters over every stored question.
    async fn usage_totals(&self) -> Result<QuestionStats, QuestionPersistenceError>;

    /// Aggregate counters scoped to one recipient handle.
    ///
    /// A handle with no stored account yields the zero-question aggregate
    /// rather than an error.
    async fn usage_totals_for_handle(
        &self,
        handle: &Handle,
    ) -> Result<QuestionStats, QuestionPersistenceError>;
}

/// Fixture implementation for tests that do not exercise question persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureQuestionRepository;

#[async_trait]
impl QuestionRepository for FixtureQuestionRepository {
    async fn insert(
        &self,
        content: &QuestionContent,
        recipient: &AccountId,
    ) -> Result<Question, QuestionPersistenceError> {
        Ok(Question::new(
            QuestionId::random(),
            content.clone(),
            *recipient,
            chrono::Utc::now(),
        ))
    }

    async fn list_all(&self) -> Result<Vec<QuestionWithRecipient>, QuestionPersistenceError> {
        Ok(Vec::new())
    }

    async fn list_for_handle(
        &self,
        _handle: &Handle,
    ) -> Result<Vec<QuestionWithRecipient>, QuestionPersistenceError> {
        Ok(Vec::new())
    }

    async fn exists(&self, _id: &QuestionId) -> Result<bool, QuestionPersistenceError> {
        Ok(false)
    }

    async fn usage_totals(&self) -> Result<QuestionStats, QuestionPersistenceError> {
        Ok(QuestionStats::empty())
    }

    async fn usage_totals_for_handle(
        &self,
        _handle: &Handle,
    ) -> Result<QuestionStats, QuestionPersistenceError> {
        Ok(QuestionStats::empty())
    }
}
