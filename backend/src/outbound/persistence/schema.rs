//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Resolved provider accounts.
    ///
    /// One row per handle known to this deployment. Rows are created lazily
    /// the first time a handle is looked up or mentioned in a question; the
    /// unique constraint on `handle` arbitrates concurrent resolution.
    accounts (id) {
        /// Primary key: UUID v4 assigned by the resolver.
        id -> Uuid,
        /// Identifier the external provider uses for this account.
        #[max_length = 64]
        external_id -> Varchar,
        /// Case-sensitive handle without the leading `@`. Unique.
        handle -> Text,
        /// Display name as reported by the provider.
        #[max_length = 256]
        display_name -> Varchar,
        /// Profile bio as reported by the provider.
        bio -> Text,
        /// Avatar image URL as reported by the provider.
        #[max_length = 2048]
        avatar_url -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Submitted questions.
    ///
    /// The reply-pipeline columns (`answered_at`, `answer`,
    /// `external_post_id`, `posted_at`) are populated by an external process;
    /// this application only ever reads them.
    questions (id) {
        /// Primary key: UUID v4 assigned on submission.
        id -> Uuid,
        /// Raw submitted text (max 140 characters).
        #[max_length = 140]
        content -> Varchar,
        /// Account the question is addressed to.
        recipient_id -> Uuid,
        /// When the question was submitted.
        asked_at -> Timestamptz,
        /// When the recipient answered, if ever.
        answered_at -> Nullable<Timestamptz>,
        /// The answer text, if any.
        answer -> Nullable<Text>,
        /// Identifier assigned by the provider when the answer was posted.
        #[max_length = 64]
        external_post_id -> Nullable<Varchar>,
        /// When the answer was posted to the provider.
        posted_at -> Nullable<Timestamptz>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Answer-notification requests.
    ///
    /// Each row records an email address to notify once the referenced
    /// question is answered.
    notification_intents (id) {
        /// Primary key: UUID v4 assigned on registration.
        id -> Uuid,
        /// Question the notification is attached to.
        question_id -> Uuid,
        /// Address to notify (max 254 characters).
        #[max_length = 254]
        email -> Varchar,
        /// When the notification was requested.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(questions -> accounts (recipient_id));
diesel::joinable!(notification_intents -> questions (question_id));

diesel::allow_tables_to_appear_in_same_query!(accounts, notification_intents, questions);
