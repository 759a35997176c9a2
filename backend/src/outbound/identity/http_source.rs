//! Reqwest-backed identity provider adapter.
//!
//! This adapter owns transport details only: the lookup request, bearer
//! authentication, timeout and HTTP error mapping, and JSON decoding into
//! the domain profile record.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::ProviderProfileDto;
use crate::domain::Handle;
use crate::domain::ports::{IdentityProfile, IdentityProfileSource, IdentityProviderError};

/// Identity provider adapter that performs HTTP GET lookups against one
/// endpoint.
///
/// The lookup contract is `GET {lookup_url}?username={handle}` with a
/// bearer credential; a `404` means the handle does not exist on the
/// provider.
pub struct HttpIdentityProfileSource {
    client: Client,
    lookup_url: Url,
    bearer_token: String,
    timeout_seconds: u64,
}

impl HttpIdentityProfileSource {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        lookup_url: Url,
        bearer_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            lookup_url,
            bearer_token: bearer_token.into(),
            timeout_seconds: timeout.as_secs().max(1),
        })
    }
}

#[async_trait]
impl IdentityProfileSource for HttpIdentityProfileSource {
    async fn fetch_profile(
        &self,
        handle: &Handle,
    ) -> Result<IdentityProfile, IdentityProviderError> {
        let response = self
            .client
            .get(self.lookup_url.clone())
            .query(&[("username", handle.as_ref())])
            .bearer_auth(&self.bearer_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| map_transport_error(error, self.timeout_seconds))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(error, self.timeout_seconds))?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref(), handle));
        }

        parse_profile(body.as_ref())
    }
}

fn parse_profile(body: &[u8]) -> Result<IdentityProfile, IdentityProviderError> {
    let decoded: ProviderProfileDto = serde_json::from_slice(body).map_err(|error| {
        IdentityProviderError::decode(format!("invalid profile JSON payload: {error}"))
    })?;
    Ok(decoded.into())
}

fn map_transport_error(error: reqwest::Error, timeout_seconds: u64) -> IdentityProviderError {
    if error.is_timeout() {
        IdentityProviderError::timeout(timeout_seconds)
    } else {
        IdentityProviderError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8], handle: &Handle) -> IdentityProviderError {
    if status == StatusCode::NOT_FOUND {
        return IdentityProviderError::profile_not_found(handle.as_ref());
    }

    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => IdentityProviderError::rate_limited(message),
        _ if status.is_client_error() => IdentityProviderError::invalid_request(message),
        _ => IdentityProviderError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
