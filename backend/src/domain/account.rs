//! Account data model.
//!
//! An account is the cached local representation of an identity fetched from
//! the external provider. Accounts are created lazily on first reference and
//! treated as immutable afterwards; nothing in this crate updates or deletes
//! them.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;
use uuid::Uuid;

use super::handle::{Handle, HandleValidationError};
use super::ports::IdentityProfile;

/// Maximum length accepted for a provider-issued external identifier.
pub const EXTERNAL_ID_MAX: usize = 64;
/// Maximum length accepted for a display name.
pub const DISPLAY_NAME_MAX: usize = 256;
/// Maximum length accepted for a profile bio.
pub const BIO_MAX: usize = 4096;
/// Maximum length accepted for an avatar URL.
pub const AVATAR_URL_MAX: usize = 2048;

/// Validation errors returned by the [`Account`] constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    InvalidId,
    EmptyExternalId,
    ExternalIdTooLong { max: usize },
    Handle(HandleValidationError),
    EmptyDisplayName,
    DisplayNameTooLong { max: usize },
    BioTooLong { max: usize },
    EmptyAvatarUrl,
    AvatarUrlTooLong { max: usize },
    InvalidAvatarUrl,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "account id must be a valid UUID"),
            Self::EmptyExternalId => write!(f, "external id must not be empty"),
            Self::ExternalIdTooLong { max } => {
                write!(f, "external id must be at most {max} characters")
            }
            Self::Handle(err) => write!(f, "{err}"),
            Self::EmptyDisplayName => write!(f, "display name must not be empty"),
            Self::DisplayNameTooLong { max } => {
                write!(f, "display name must be at most {max} characters")
            }
            Self::BioTooLong { max } => write!(f, "bio must be at most {max} characters"),
            Self::EmptyAvatarUrl => write!(f, "avatar URL must not be empty"),
            Self::AvatarUrlTooLong { max } => {
                write!(f, "avatar URL must be at most {max} characters")
            }
            Self::InvalidAvatarUrl => write!(f, "avatar URL must be a valid URL"),
        }
    }
}

impl std::error::Error for AccountValidationError {}

impl From<HandleValidationError> for AccountValidationError {
    fn from(value: HandleValidationError) -> Self {
        Self::Handle(value)
    }
}

/// Stable internal account identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(Uuid);

impl AccountId {
    /// Validate and construct an [`AccountId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| AccountValidationError::InvalidId)
    }

    /// Generate a new random [`AccountId`].
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

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Identifier issued by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExternalAccountId(String);

impl ExternalAccountId {
    /// Validate and construct an [`ExternalAccountId`] from owned input.
    pub fn new(id: impl Into<String>) -> Result<Self, AccountValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(AccountValidationError::EmptyExternalId);
        }
        if id.chars().count() > EXTERNAL_ID_MAX {
            return Err(AccountValidationError::ExternalIdTooLong {
                max: EXTERNAL_ID_MAX,
            });
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ExternalAccountId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ExternalAccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ExternalAccountId> for String {
    fn from(value: ExternalAccountId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ExternalAccountId {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Human readable display name reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`] from owned input.
    pub fn new(display_name: impl Into<String>) -> Result<Self, AccountValidationError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(AccountValidationError::EmptyDisplayName);
        }
        if display_name.chars().count() > DISPLAY_NAME_MAX {
            return Err(AccountValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(display_name))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Free-text profile bio; may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bio(String);

impl Bio {
    /// Validate and construct a [`Bio`] from owned input.
    pub fn new(bio: impl Into<String>) -> Result<Self, AccountValidationError> {
        let bio = bio.into();
        if bio.chars().count() > BIO_MAX {
            return Err(AccountValidationError::BioTooLong { max: BIO_MAX });
        }
        Ok(Self(bio))
    }
}

impl AsRef<str> for Bio {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Bio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Bio> for String {
    fn from(value: Bio) -> Self {
        value.0
    }
}

impl TryFrom<String> for Bio {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Avatar image URL reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AvatarUrl(String);

impl AvatarUrl {
    /// Validate and construct an [`AvatarUrl`] from owned input.
    pub fn new(avatar_url: impl Into<String>) -> Result<Self, AccountValidationError> {
        let avatar_url = avatar_url.into();
        if avatar_url.trim().is_empty() {
            return Err(AccountValidationError::EmptyAvatarUrl);
        }
        if avatar_url.chars().count() > AVATAR_URL_MAX {
            return Err(AccountValidationError::AvatarUrlTooLong {
                max: AVATAR_URL_MAX,
            });
        }
        if Url::parse(&avatar_url).is_err() {
            return Err(AccountValidationError::InvalidAvatarUrl);
        }
        Ok(Self(avatar_url))
    }
}

impl AsRef<str> for AvatarUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AvatarUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<AvatarUrl> for String {
    fn from(value: AvatarUrl) -> Self {
        value.0
    }
}

impl TryFrom<String> for AvatarUrl {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Cached external identity.
///
/// ## Invariants
/// - `handle` is unique within the store.
/// - All fields satisfy the bounds enforced by their newtypes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
#[serde(try_from = "AccountDto", into = "AccountDto")]
pub struct Account {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: AccountId,
    #[schema(value_type = String, example = "1003920011")]
    external_id: ExternalAccountId,
    #[schema(value_type = String, example = "bob")]
    handle: Handle,
    #[schema(value_type = String, example = "Bob Mortimer")]
    display_name: DisplayName,
    #[schema(value_type = String, example = "Occasional answerer of questions.")]
    bio: Bio,
    #[schema(value_type = String, example = "https://images.example.com/bob.png")]
    avatar_url: AvatarUrl,
}

impl Account {
    /// Build a new [`Account`] from validated components.
    #[must_use]
    pub const fn new(
        id: AccountId,
        external_id: ExternalAccountId,
        handle: Handle,
        display_name: DisplayName,
        bio: Bio,
        avatar_url: AvatarUrl,
    ) -> Self {
        Self {
            id,
            external_id,
            handle,
            display_name,
            bio,
            avatar_url,
        }
    }

    /// Fallible constructor enforcing every field invariant.
    pub fn try_from_parts(
        id: impl AsRef<str>,
        external_id: impl Into<String>,
        handle: impl Into<String>,
        display_name: impl Into<String>,
        bio: impl Into<String>,
        avatar_url: impl Into<String>,
    ) -> Result<Self, AccountValidationError> {
        Ok(Self::new(
            AccountId::new(id)?,
            ExternalAccountId::new(external_id)?,
            Handle::new(handle)?,
            DisplayName::new(display_name)?,
            Bio::new(bio)?,
            AvatarUrl::new(avatar_url)?,
        ))
    }

    /// Build an [`Account`] from a provider profile, validating every field.
    ///
    /// The resolver assigns the internal identifier; all remaining fields
    /// come from the provider verbatim, including the handle's casing.
    pub fn try_from_profile(
        id: AccountId,
        profile: IdentityProfile,
    ) -> Result<Self, AccountValidationError> {
        let IdentityProfile {
            external_id,
            handle,
            display_name,
            bio,
            avatar_url,
        } = profile;

        Ok(Self::new(
            id,
            ExternalAccountId::new(external_id)?,
            Handle::new(handle)?,
            DisplayName::new(display_name)?,
            Bio::new(bio)?,
            AvatarUrl::new(avatar_url)?,
        ))
    }

    /// Stable internal identifier.
    #[must_use]
    pub const fn id(&self) -> &AccountId {
        &self.id
    }

    /// Identifier issued by the external provider.
    #[must_use]
    pub const fn external_id(&self) -> &ExternalAccountId {
        &self.external_id
    }

    /// Unique case-sensitive handle.
    #[must_use]
    pub const fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Display name shown alongside questions.
    #[must_use]
    pub const fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Free-text profile bio.
    #[must_use]
    pub const fn bio(&self) -> &Bio {
        &self.bio
    }

    /// Avatar image URL.
    #[must_use]
    pub const fn avatar_url(&self) -> &AvatarUrl {
        &self.avatar_url
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct AccountDto {
    id: String,
    external_id: String,
    handle: String,
    display_name: String,
    bio: String,
    avatar_url: String,
}

impl From<Account> for AccountDto {
    fn from(value: Account) -> Self {
        let Account {
            id,
            external_id,
            handle,
            display_name,
            bio,
            avatar_url,
        } = value;
        Self {
            id: id.to_string(),
            external_id: external_id.into(),
            handle: handle.into(),
            display_name: display_name.into(),
            bio: bio.into(),
            avatar_url: avatar_url.into(),
        }
    }
}

impl TryFrom<AccountDto> for Account {
    type Error = AccountValidationError;

    fn try_from(value: AccountDto) -> Result<Self, Self::Error> {
        Account::try_from_parts(
            value.id,
            value.external_id,
            value.handle,
            value.display_name,
            value.bio,
            value.avatar_url,
        )
    }
}
