//! Port for notification intent persistence.

use async_trait::async_trait;

use crate::domain::{EmailAddress, NotificationIntent, NotificationIntentId, QuestionId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification repository adapters.
    pub enum NotificationPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "notification repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "notification repository query failed: {message}",
    }
}

/// Port for storing answer-notification subscriptions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Persist a subscription for `question_id` and return the stored row.
    ///
    /// Referential integrity against the question table is the caller's
    /// concern; adapters report a broken reference as a query failure.
    async fn insert(
        &self,
        question_id: &QuestionId,
        email: &EmailAddress,
    ) -> Result<NotificationIntent, NotificationPersistenceError>;
}

/// Fixture implementation for tests that do not exercise notification
/// persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNotificationRepository;

#[async_trait]
impl NotificationRepository for FixtureNotificationRepository {
    async fn insert(
        &self,
        question_id: &QuestionId,
        email: &EmailAddress,
    ) -> Result<NotificationIntent, NotificationPersistenceError> {
        Ok(NotificationIntent::new(
            NotificationIntentId::random(),
            *question_id,
            email.clone(),
            chrono::Utc::now(),
        ))
    }
}
