//! Driving port for answer-notification registration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    EmailAddress, Error, NotificationIntent, NotificationIntentId, QuestionId,
};

/// Request to be notified when a question is answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterNotificationRequest {
    pub question_id: Uuid,
    pub email: String,
}

/// Response from registering a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterNotificationResponse {
    pub notification: NotificationIntent,
}

/// Driving port for notification write operations.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), askbox_backend::domain::Error> {
/// use askbox_backend::domain::ports::{
///     FixtureNotificationCommand, NotificationCommand, RegisterNotificationRequest,
/// };
///
/// let command = FixtureNotificationCommand;
/// let request = RegisterNotificationRequest {
///     question_id: uuid::Uuid::new_v4(),
///     email: "visitor@example.com".to_owned(),
/// };
/// let response = command.register_notification(request).await?;
/// assert_eq!(response.notification.email().as_ref(), "visitor@example.com");
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationCommand: Send + Sync {
    /// Store a subscription against an existing question.
    ///
    /// Fails with an invalid-request error when the email is implausible or
    /// the question does not exist.
    async fn register_notification(
        &self,
        request: RegisterNotificationRequest,
    ) -> Result<RegisterNotificationResponse, Error>;
}

/// Fixture command for tests that do not need persistence.
///
/// Accepts any existing-looking question identifier and validates only the
/// email shape.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNotificationCommand;

#[async_trait]
impl NotificationCommand for FixtureNotificationCommand {
    async fn register_notification(
        &self,
        request: RegisterNotificationRequest,
    ) -> Result<RegisterNotificationResponse, Error> {
        let email = EmailAddress::new(request.email)
            .map_err(|err| Error::invalid_request(format!("invalid email address: {err}")))?;

        Ok(RegisterNotificationResponse {
            notification: NotificationIntent::new(
                NotificationIntentId::random(),
                QuestionId::from_uuid(request.question_id),
                email,
                chrono::Utc::now(),
            ),
        })
    }
}
