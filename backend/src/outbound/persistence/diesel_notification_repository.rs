//! PostgreSQL-backed `NotificationRepository` implementation using Diesel ORM.
//!
//! This adapter records answer-notification requests. The table is
//! insert-only from this application's point of view; delivery is owned by
//! an external process reading the same rows.

use async_trait::async_trait;
use chrono::Utc;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NotificationPersistenceError, NotificationRepository};
use crate::domain::{EmailAddress, NotificationIntent, NotificationIntentId, QuestionId};

use super::diesel_error_mapping::{map_statement_error, pool_error_message};
use super::models::NewNotificationIntentRow;
use super::pool::{DbPool, PoolError};
use super::schema::notification_intents;

/// Diesel-backed implementation of the notification repository port.
#[derive(Clone)]
pub struct DieselNotificationRepository {
    pool: DbPool,
}

impl DieselNotificationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> NotificationPersistenceError {
    NotificationPersistenceError::connection(pool_error_message(error))
}

/// Map Diesel errors to domain repository errors.
///
/// A foreign-key violation lands here as a query error; the service layer
/// checks that the question exists before registering.
fn map_diesel_error(error: diesel::result::Error) -> NotificationPersistenceError {
    map_statement_error(
        error,
        NotificationPersistenceError::query,
        NotificationPersistenceError::connection,
    )
}

#[async_trait]
impl NotificationRepository for DieselNotificationRepository {
    async fn insert(
        &self,
        question_id: &QuestionId,
        email: &EmailAddress,
    ) -> Result<NotificationIntent, NotificationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let intent = NotificationIntent::new(
            NotificationIntentId::random(),
            question_id.clone(),
            email.clone(),
            Utc::now(),
        );

        let new_row = NewNotificationIntentRow {
            id: *intent.id().as_uuid(),
            question_id: *intent.question_id().as_uuid(),
            email: intent.email().as_ref(),
            created_at: intent.created_at(),
        };

        diesel::insert_into(notification_intents::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(intent)
    }
}
