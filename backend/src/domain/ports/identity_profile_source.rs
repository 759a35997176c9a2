//! Port for looking up profiles at the external identity provider.
//!
//! Resolution adapters fetch the canonical profile behind a handle so that a
//! local account can be minted from it. The port deliberately reports
//! "unknown handle" separately from provider outages: callers map the former
//! to a not-found outcome and everything else to service unavailability.

use async_trait::async_trait;

use crate::domain::Handle;

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// The provider holds no profile for the requested handle.
        ProfileNotFound { handle: String } =>
            "identity provider has no profile for @{handle}",
        /// The provider rejected the request as malformed.
        InvalidRequest { message: String } =>
            "identity provider rejected the request: {message}",
        /// The provider throttled the caller.
        RateLimited { message: String } =>
            "identity provider rate limit reached: {message}",
        /// The request ran past the configured deadline.
        Timeout { seconds: u64 } =>
            "identity provider timed out after {seconds}s",
        /// The provider could not be reached or failed mid-request.
        Transport { message: String } =>
            "identity provider transport failure: {message}",
        /// The response body did not match the documented profile shape.
        Decode { message: String } =>
            "identity provider returned an undecodable profile: {message}",
    }
}

/// Raw profile record as reported by the identity provider.
///
/// Fields are unvalidated provider output; [`crate::domain::Account`]
/// construction applies the stored-field bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProfile {
    /// Provider-scoped stable identifier.
    pub external_id: String,
    /// Handle as spelled by the provider, which may differ in case from the
    /// handle that was asked for.
    pub handle: String,
    /// Human-readable account name.
    pub display_name: String,
    /// Free-form profile description, possibly empty.
    pub bio: String,
    /// Absolute URL of the profile image.
    pub avatar_url: String,
}

/// Port for fetching the canonical profile behind a handle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProfileSource: Send + Sync {
    /// Look up the profile for `handle` at the provider.
    async fn fetch_profile(&self, handle: &Handle)
    -> Result<IdentityProfile, IdentityProviderError>;
}

/// Fixture source for tests and fixture-backed servers.
///
/// Answers every lookup with a deterministic profile derived from the
/// requested handle.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProfileSource;

#[async_trait]
impl IdentityProfileSource for FixtureIdentityProfileSource {
    async fn fetch_profile(
        &self,
        handle: &Handle,
    ) -> Result<IdentityProfile, IdentityProviderError> {
        Ok(IdentityProfile {
            external_id: format!("fixture-{handle}"),
            handle: handle.as_ref().to_owned(),
            display_name: handle.as_ref().to_owned(),
            bio: String::new(),
            avatar_url: format!("https://avatars.example.net/{handle}.png"),
        })
    }
}
