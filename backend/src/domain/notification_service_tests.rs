//! Tests for the notification service.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{MockNotificationRepository, MockQuestionRepository};
use crate::domain::{ErrorCode, NotificationIntent, NotificationIntentId};

fn service(
    notifications: MockNotificationRepository,
    questions: MockQuestionRepository,
) -> NotificationCommandService<MockNotificationRepository, MockQuestionRepository> {
    NotificationCommandService::new(Arc::new(notifications), Arc::new(questions))
}

#[tokio::test]
async fn register_stores_a_subscription_for_an_existing_question() {
    let question_id = Uuid::new_v4();

    let mut questions = MockQuestionRepository::new();
    questions
        .expect_exists()
        .times(1)
        .withf(move |id| id.as_uuid() == &question_id)
        .returning(|_| Ok(true));
    let mut notifications = MockNotificationRepository::new();
    notifications
        .expect_insert()
        .times(1)
        .returning(|id, email| {
            Ok(NotificationIntent::new(
                NotificationIntentId::random(),
                *id,
                email.clone(),
                Utc::now(),
            ))
        });

    let response = service(notifications, questions)
        .register_notification(RegisterNotificationRequest {
            question_id,
            email: "visitor@example.com".to_owned(),
        })
        .await
        .expect("registration succeeds");

    assert_eq!(response.notification.question_id().as_uuid(), &question_id);
    assert_eq!(response.notification.email().as_ref(), "visitor@example.com");
}

#[tokio::test]
async fn register_rejects_subscriptions_for_missing_questions() {
    let mut questions = MockQuestionRepository::new();
    questions.expect_exists().times(1).returning(|_| Ok(false));
    let mut notifications = MockNotificationRepository::new();
    notifications.expect_insert().times(0);

    let error = service(notifications, questions)
        .register_notification(RegisterNotificationRequest {
            question_id: Uuid::new_v4(),
            email: "visitor@example.com".to_owned(),
        })
        .await
        .expect_err("missing question");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn register_rejects_implausible_emails_before_any_lookup() {
    let mut questions = MockQuestionRepository::new();
    questions.expect_exists().times(0);
    let mut notifications = MockNotificationRepository::new();
    notifications.expect_insert().times(0);

    let error = service(notifications, questions)
        .register_notification(RegisterNotificationRequest {
            question_id: Uuid::new_v4(),
            email: "not-an-email".to_owned(),
        })
        .await
        .expect_err("implausible email");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn register_maps_connection_errors_to_service_unavailable() {
    let mut questions = MockQuestionRepository::new();
    questions
        .expect_exists()
        .times(1)
        .returning(|_| Err(QuestionPersistenceError::connection("pool exhausted")));
    let mut notifications = MockNotificationRepository::new();
    notifications.expect_insert().times(0);

    let error = service(notifications, questions)
        .register_notification(RegisterNotificationRequest {
            question_id: Uuid::new_v4(),
            email: "visitor@example.com".to_owned(),
        })
        .await
        .expect_err("connection failure");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
