//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{accounts, notification_intents, questions};

/// Row struct for reading from the accounts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub external_id: String,
    pub handle: String,
    pub display_name: String,
    pub bio: String,
    pub avatar_url: String,
    #[expect(dead_code, reason = "audit column not surfaced in the domain")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "audit column not surfaced in the domain")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new account records.
///
/// Audit timestamps are filled in by column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub external_id: &'a str,
    pub handle: &'a str,
    pub display_name: &'a str,
    pub bio: &'a str,
    pub avatar_url: &'a str,
}

// ---------------------------------------------------------------------------
// Question models
// ---------------------------------------------------------------------------

/// Row struct for reading from the questions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct QuestionRow {
    pub id: Uuid,
    pub content: String,
    pub recipient_id: Uuid,
    pub asked_at: DateTime<Utc>,
    pub answered_at: Option<DateTime<Utc>>,
    pub answer: Option<String>,
    pub external_post_id: Option<String>,
    pub posted_at: Option<DateTime<Utc>>,
    #[expect(dead_code, reason = "audit column not surfaced in the domain")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new question records.
///
/// The reply-pipeline columns stay at their NULL defaults; an external
/// process owns them.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = questions)]
pub(crate) struct NewQuestionRow<'a> {
    pub id: Uuid,
    pub content: &'a str,
    pub recipient_id: Uuid,
    pub asked_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Notification intent models
// ---------------------------------------------------------------------------

/// Insertable struct for creating new notification intents.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notification_intents)]
pub(crate) struct NewNotificationIntentRow<'a> {
    pub id: Uuid,
    pub question_id: Uuid,
    pub email: &'a str,
    pub created_at: DateTime<Utc>,
}
