//! Notification domain service.
//!
//! Implements the notification registration port: subscriptions are only
//! accepted against questions that exist.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    NotificationCommand, NotificationPersistenceError, NotificationRepository,
    QuestionPersistenceError, QuestionRepository, RegisterNotificationRequest,
    RegisterNotificationResponse,
};
use crate::domain::{EmailAddress, Error, QuestionId};

fn map_notification_repository_error(error: NotificationPersistenceError) -> Error {
    match error {
        NotificationPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("notification repository unavailable: {message}"))
        }
        NotificationPersistenceError::Query { message } => {
            Error::internal(format!("notification repository error: {message}"))
        }
    }
}

fn map_question_repository_error(error: QuestionPersistenceError) -> Error {
    match error {
        QuestionPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("question repository unavailable: {message}"))
        }
        QuestionPersistenceError::Query { message } => {
            Error::internal(format!("question repository error: {message}"))
        }
    }
}

/// Notification service implementing the registration port.
#[derive(Clone)]
pub struct NotificationCommandService<N, Q> {
    notification_repo: Arc<N>,
    question_repo: Arc<Q>,
}

impl<N, Q> NotificationCommandService<N, Q> {
    /// Create a new notification service over the notification and question
    /// repositories.
    pub fn new(notification_repo: Arc<N>, question_repo: Arc<Q>) -> Self {
        Self {
            notification_repo,
            question_repo,
        }
    }
}

#[async_trait]
impl<N, Q> NotificationCommand for NotificationCommandService<N, Q>
where
    N: NotificationRepository,
    Q: QuestionRepository,
{
    async fn register_notification(
        &self,
        request: RegisterNotificationRequest,
    ) -> Result<RegisterNotificationResponse, Error> {
        let email = EmailAddress::new(request.email)
            .map_err(|err| Error::invalid_request(format!("invalid email address: {err}")))?;
        let question_id = QuestionId::from_uuid(request.question_id);

        let known = self
            .question_repo
            .exists(&question_id)
            .await
            .map_err(map_question_repository_error)?;
        if !known {
            return Err(Error::invalid_request(format!(
                "question {question_id} does not exist"
            )));
        }

        let notification = self
            .notification_repo
            .insert(&question_id, &email)
            .await
            .map_err(map_notification_repository_error)?;

        Ok(RegisterNotificationResponse { notification })
    }
}

#[cfg(test)]
#[path = "notification_service_tests.rs"]
mod tests;
