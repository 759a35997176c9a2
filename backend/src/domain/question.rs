//! Question data model.
//!
//! Questions are created by the submission flow and never mutated by this
//! crate. The answer and posting columns exist for the original system's
//! reply pipeline, which was never implemented; they are carried so the
//! statistics formula over `answered_at` keeps its meaning.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::account::{Account, AccountId};

/// Maximum question length in characters.
pub const QUESTION_CONTENT_MAX: usize = 140;

/// Validation errors returned by the question constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionValidationError {
    InvalidId,
    EmptyContent,
    ContentTooLong { max: usize },
}

impl fmt::Display for QuestionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "question id must be a valid UUID"),
            Self::EmptyContent => write!(f, "question must not be empty"),
            Self::ContentTooLong { max } => {
                write!(f, "question must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for QuestionValidationError {}

/// Stable question identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuestionId(Uuid);

impl QuestionId {
    /// Validate and construct a [`QuestionId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, QuestionValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| QuestionValidationError::InvalidId)
    }

    /// Generate a new random [`QuestionId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<QuestionId> for String {
    fn from(value: QuestionId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for QuestionId {
    type Error = QuestionValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Raw question text, bounded to [`QUESTION_CONTENT_MAX`] characters.
///
/// The text is stored exactly as submitted; only emptiness (after trimming)
/// and length are enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuestionContent(String);

impl QuestionContent {
    /// Validate and construct [`QuestionContent`] from owned input.
    pub fn new(content: impl Into<String>) -> Result<Self, QuestionValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(QuestionValidationError::EmptyContent);
        }
        if content.chars().count() > QUESTION_CONTENT_MAX {
            return Err(QuestionValidationError::ContentTooLong {
                max: QUESTION_CONTENT_MAX,
            });
        }
        Ok(Self(content))
    }
}

impl AsRef<str> for QuestionContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for QuestionContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<QuestionContent> for String {
    fn from(value: QuestionContent) -> Self {
        value.0
    }
}

impl TryFrom<String> for QuestionContent {
    type Error = QuestionValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A persisted question addressed to an account.
///
/// ## Invariants
/// - `recipient_id` references an existing [`Account`].
/// - `answered_at`, `answer`, `external_post_id`, and `posted_at` are never
///   written by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[schema(value_type = String, example = "7c9e6679-7425-40de-944b-e07fc1f90ae7")]
    id: QuestionId,
    #[schema(value_type = String, example = "@bob what's your favourite colour?")]
    content: QuestionContent,
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    recipient_id: AccountId,
    /// When the question was submitted.
    asked_at: DateTime<Utc>,
    /// When the recipient answered, if ever.
    #[serde(skip_serializing_if = "Option::is_none")]
    answered_at: Option<DateTime<Utc>>,
    /// The answer text, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    answer: Option<String>,
    /// Identifier assigned by the provider when the question was posted.
    #[serde(skip_serializing_if = "Option::is_none")]
    external_post_id: Option<String>,
    /// When the question was posted to the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    posted_at: Option<DateTime<Utc>>,
}

impl Question {
    /// Build a [`Question`] from validated components.
    #[must_use]
    pub const fn new(
        id: QuestionId,
        content: QuestionContent,
        recipient_id: AccountId,
        asked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            content,
            recipient_id,
            asked_at,
            answered_at: None,
            answer: None,
            external_post_id: None,
            posted_at: None,
        }
    }

    /// Rehydrate a [`Question`] including the reply-pipeline columns.
    #[must_use]
    pub const fn from_stored(
        id: QuestionId,
        content: QuestionContent,
        recipient_id: AccountId,
        asked_at: DateTime<Utc>,
        answered_at: Option<DateTime<Utc>>,
        answer: Option<String>,
        external_post_id: Option<String>,
        posted_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            content,
            recipient_id,
            asked_at,
            answered_at,
            answer,
            external_post_id,
            posted_at,
        }
    }

    /// Stable question identifier.
    #[must_use]
    pub const fn id(&self) -> &QuestionId {
        &self.id
    }

    /// Raw submitted text.
    #[must_use]
    pub const fn content(&self) -> &QuestionContent {
        &self.content
    }

    /// Identifier of the recipient account.
    #[must_use]
    pub const fn recipient_id(&self) -> &AccountId {
        &self.recipient_id
    }

    /// Submission timestamp.
    #[must_use]
    pub const fn asked_at(&self) -> DateTime<Utc> {
        self.asked_at
    }

    /// Answer timestamp, if the question was ever answered.
    #[must_use]
    pub const fn answered_at(&self) -> Option<DateTime<Utc>> {
        self.answered_at
    }

    /// Answer text, if any.
    #[must_use]
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    /// Provider-issued post identifier, if the question was ever posted.
    #[must_use]
    pub fn external_post_id(&self) -> Option<&str> {
        self.external_post_id.as_deref()
    }

    /// Posting timestamp, if the question was ever posted.
    #[must_use]
    pub const fn posted_at(&self) -> Option<DateTime<Utc>> {
        self.posted_at
    }
}

/// A question paired with its recipient account, as consumed by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionWithRecipient {
    /// The persisted question.
    pub question: Question,
    /// The account the question is addressed to.
    pub recipient: Account,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_question() -> Question {
        Question::new(
            QuestionId::random(),
            QuestionContent::new("@bob what's your favourite colour?").expect("valid content"),
            AccountId::random(),
            Utc::now(),
        )
    }

    #[rstest]
    #[case("@bob hi")]
    #[case("x")]
    fn content_accepts_bounded_text(#[case] raw: &str) {
        let content = QuestionContent::new(raw).expect("valid content");
        assert_eq!(content.as_ref(), raw);
    }

    #[test]
    fn content_accepts_exactly_140_characters() {
        let raw = "x".repeat(QUESTION_CONTENT_MAX);
        assert!(QuestionContent::new(raw).is_ok());
    }

    #[rstest]
    #[case("", QuestionValidationError::EmptyContent)]
    #[case("   ", QuestionValidationError::EmptyContent)]
    fn content_rejects_blank_text(#[case] raw: &str, #[case] expected: QuestionValidationError) {
        assert_eq!(QuestionContent::new(raw), Err(expected));
    }

    #[test]
    fn content_rejects_text_over_140_characters() {
        let raw = "x".repeat(QUESTION_CONTENT_MAX + 1);
        assert_eq!(
            QuestionContent::new(raw),
            Err(QuestionValidationError::ContentTooLong {
                max: QUESTION_CONTENT_MAX
            })
        );
    }

    #[test]
    fn content_counts_characters_not_bytes() {
        // 140 two-byte characters must still be accepted.
        let raw = "é".repeat(QUESTION_CONTENT_MAX);
        assert!(QuestionContent::new(raw).is_ok());
    }

    #[test]
    fn new_questions_carry_no_answer_state() {
        let question = sample_question();
        assert!(question.answered_at().is_none());
        assert!(question.answer().is_none());
        assert!(question.external_post_id().is_none());
        assert!(question.posted_at().is_none());
    }

    #[test]
    fn serde_omits_absent_reply_columns() {
        let question = sample_question();
        let serialised = serde_json::to_value(&question).expect("serialise question");
        assert!(serialised.get("answeredAt").is_none());
        assert!(serialised.get("answer").is_none());
        assert_eq!(
            serialised["content"],
            "@bob what's your favourite colour?"
        );
    }
}
