//! Social-media handle primitive and extraction from free text.
//!
//! A handle is the word-character run following an `@` sign. Matching is
//! case-sensitive throughout the system; no normalisation is applied at any
//! layer, preserving whatever casing the external provider reports.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation errors returned by the [`Handle`] constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleValidationError {
    EmptyHandle,
    InvalidCharacters,
}

impl fmt::Display for HandleValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyHandle => write!(f, "handle must not be empty"),
            Self::InvalidCharacters => write!(
                f,
                "handle may only contain letters, digits, or underscores",
            ),
        }
    }
}

impl std::error::Error for HandleValidationError {}

static HANDLE_RE: OnceLock<Regex> = OnceLock::new();

fn handle_regex() -> &'static Regex {
    HANDLE_RE.get_or_init(|| {
        // ASCII word characters only; the capture group is the handle.
        let pattern = "@([A-Za-z0-9_]+)";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("handle regex failed to compile: {error}"))
    })
}

/// Case-sensitive account handle without its leading `@`.
///
/// # Examples
/// ```
/// use askbox_backend::domain::Handle;
///
/// let handle = Handle::new("bob").expect("valid handle");
/// assert_eq!(handle.as_ref(), "bob");
/// assert!(Handle::new("not a handle").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Handle(String);

impl Handle {
    /// Validate and construct a [`Handle`] from owned input.
    pub fn new(handle: impl Into<String>) -> Result<Self, HandleValidationError> {
        Self::from_owned(handle.into())
    }

    /// Construct a [`Handle`] from caller-facing input, accepting at most
    /// one leading `@`.
    ///
    /// Lookup surfaces accept `@alice` and `alice` interchangeably; the
    /// stored handle never carries the sigil.
    ///
    /// # Examples
    /// ```
    /// use askbox_backend::domain::Handle;
    ///
    /// let bare = Handle::parse_lenient("alice").expect("valid");
    /// let sigil = Handle::parse_lenient("@alice").expect("valid");
    /// assert_eq!(bare, sigil);
    /// ```
    pub fn parse_lenient(raw: impl AsRef<str>) -> Result<Self, HandleValidationError> {
        let raw = raw.as_ref();
        let bare = raw.strip_prefix('@').unwrap_or(raw);
        Self::from_owned(bare.to_owned())
    }

    fn from_owned(handle: String) -> Result<Self, HandleValidationError> {
        if handle.is_empty() {
            return Err(HandleValidationError::EmptyHandle);
        }
        if !handle
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(HandleValidationError::InvalidCharacters);
        }
        Ok(Self(handle))
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Handle> for String {
    fn from(value: Handle) -> Self {
        value.0
    }
}

impl TryFrom<String> for Handle {
    type Error = HandleValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Extract the first `@handle` token from free text.
///
/// Scans for the first `@` followed by one or more ASCII word characters
/// (letters, digits, underscore) and returns the captured run without the
/// sigil. Pure and deterministic; the only "failure" is no match.
///
/// # Examples
/// ```
/// use askbox_backend::domain::first_handle;
///
/// let handle = first_handle("@bob what's your favourite colour?");
/// assert_eq!(handle.map(String::from), Some("bob".to_owned()));
/// assert!(first_handle("no handle here").is_none());
/// ```
#[must_use]
pub fn first_handle(text: &str) -> Option<Handle> {
    handle_regex()
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|word| Handle(word.as_str().to_owned()))
}
