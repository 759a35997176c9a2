//! Notification intent data model.
//!
//! An intent records an email address to contact once a specific question is
//! answered. Delivery is out of scope; only the subscription is stored.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::question::QuestionId;

/// Maximum accepted email address length.
pub const EMAIL_MAX: usize = 254;

/// Validation errors returned by the notification constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationValidationError {
    InvalidId,
    EmptyEmail,
    EmailTooLong { max: usize },
    InvalidEmail,
}

impl fmt::Display for NotificationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "notification id must be a valid UUID"),
            Self::EmptyEmail => write!(f, "email address must not be empty"),
            Self::EmailTooLong { max } => {
                write!(f, "email address must be at most {max} characters")
            }
            Self::InvalidEmail => write!(f, "email address must contain a local part and a domain"),
        }
    }
}

impl std::error::Error for NotificationValidationError {}

/// Stable notification intent identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NotificationIntentId(Uuid);

impl NotificationIntentId {
    /// Validate and construct a [`NotificationIntentId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, NotificationValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| NotificationValidationError::InvalidId)
    }

    /// Generate a new random [`NotificationIntentId`].
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

impl fmt::Display for NotificationIntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NotificationIntentId> for String {
    fn from(value: NotificationIntentId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for NotificationIntentId {
    type Error = NotificationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Plausibly shaped email address.
///
/// Validation is intentionally shallow: exactly one `@` with a non-empty
/// local part and domain, bounded length. Deliverability is an email-layer
/// concern, not a storage one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`] from owned input.
    pub fn new(email: impl Into<String>) -> Result<Self, NotificationValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(NotificationValidationError::EmptyEmail);
        }
        if email.chars().count() > EMAIL_MAX {
            return Err(NotificationValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        let mut parts = email.splitn(2, '@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(NotificationValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = NotificationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A stored subscription to a question's eventual answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationIntent {
    #[schema(value_type = String, example = "af7c1fe6-d669-414e-b066-e9733f0de7a8")]
    id: NotificationIntentId,
    #[schema(value_type = String, example = "7c9e6679-7425-40de-944b-e07fc1f90ae7")]
    question_id: QuestionId,
    #[schema(value_type = String, example = "visitor@example.com")]
    email: EmailAddress,
    /// When the subscription was registered.
    created_at: DateTime<Utc>,
}

impl NotificationIntent {
    /// Build a [`NotificationIntent`] from validated components.
    #[must_use]
    pub const fn new(
        id: NotificationIntentId,
        question_id: QuestionId,
        email: EmailAddress,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            question_id,
            email,
            created_at,
        }
    }

    /// Stable intent identifier.
    #[must_use]
    pub const fn id(&self) -> &NotificationIntentId {
        &self.id
    }

    /// The question this intent watches.
    #[must_use]
    pub const fn question_id(&self) -> &QuestionId {
        &self.question_id
    }

    /// The address to notify.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
