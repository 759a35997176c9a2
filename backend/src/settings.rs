//! Runtime configuration loaded via OrthoConfig.
//!
//! Settings merge CLI flags, `ASKBOX_`-prefixed environment variables, and
//! optional configuration files. The identity provider credential is a
//! file-based secret so token material stays out of the environment and
//! process listings.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::warn;
use url::Url;
use zeroize::Zeroize;

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080);
const DEFAULT_TOKEN_PATH: &str = "/var/run/secrets/identity_token";
const DEFAULT_PROVIDER_TIMEOUT_SECONDS: u64 = 10;
const PLACEHOLDER_TOKEN: &str = "dev-only-identity-token";

/// Length of the token fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate missing secrets and emit warnings instead.
    Debug,
    /// Release builds require the identity credential to be provisioned.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while validating runtime configuration.
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    /// The identity lookup endpoint is not a valid URL.
    #[error("invalid identity lookup URL '{value}': {source}")]
    InvalidLookupUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    /// Reading the identity token file failed.
    #[error("failed to read identity token at {path}: {source}")]
    TokenRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The identity token file is not UTF-8 text.
    #[error("identity token at {path} is not valid UTF-8")]
    TokenNotUtf8 { path: PathBuf },
    /// The identity token file contains only whitespace.
    #[error("identity token at {path} is empty")]
    TokenEmpty { path: PathBuf },
}

/// Application settings controlling server wiring at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ASKBOX")]
pub struct AskboxSettings {
    /// PostgreSQL connection string; fixture ports serve requests when unset.
    pub database_url: Option<String>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// Identity provider profile lookup endpoint.
    pub identity_lookup_url: Option<String>,
    /// File holding the identity provider bearer token.
    pub identity_token_file: Option<PathBuf>,
    /// Budget for one identity provider call, in seconds.
    pub identity_timeout_seconds: Option<u64>,
}

impl AskboxSettings {
    /// Return the configured bind address, falling back to the default.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Return the identity call budget, falling back to the default.
    #[must_use]
    pub fn identity_timeout(&self) -> Duration {
        Duration::from_secs(
            self.identity_timeout_seconds
                .unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SECONDS),
        )
    }

    /// Resolve and validate the identity provider settings.
    ///
    /// Returns `Ok(None)` when no lookup endpoint is configured, which
    /// selects the fixture ports at startup. A configured endpoint requires
    /// a readable token file in release builds; debug builds fall back to a
    /// placeholder token with a warning.
    pub fn identity(&self, mode: BuildMode) -> Result<Option<IdentitySettings>, SettingsError> {
        let Some(raw_url) = self.identity_lookup_url.as_deref() else {
            return Ok(None);
        };
        let lookup_url = Url::parse(raw_url).map_err(|source| SettingsError::InvalidLookupUrl {
            value: raw_url.to_owned(),
            source,
        })?;
        let bearer_token = self.bearer_token(mode)?;

        Ok(Some(IdentitySettings {
            lookup_url,
            bearer_token,
            timeout: self.identity_timeout(),
        }))
    }

    fn token_path(&self) -> PathBuf {
        self.identity_token_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_PATH))
    }

    fn bearer_token(&self, mode: BuildMode) -> Result<String, SettingsError> {
        let path = self.token_path();
        match std::fs::read(&path) {
            Ok(bytes) => {
                let mut raw = String::from_utf8(bytes)
                    .map_err(|_| SettingsError::TokenNotUtf8 { path: path.clone() })?;
                let token = raw.trim().to_owned();
                raw.zeroize();
                if token.is_empty() {
                    return Err(SettingsError::TokenEmpty { path });
                }
                Ok(token)
            }
            Err(error) => {
                if mode.is_debug() {
                    warn!(
                        path = %path.display(),
                        error = %error,
                        "using placeholder identity token (dev only)"
                    );
                    Ok(PLACEHOLDER_TOKEN.to_owned())
                } else {
                    Err(SettingsError::TokenRead {
                        path,
                        source: error,
                    })
                }
            }
        }
    }
}

/// Validated identity provider settings.
#[cfg_attr(test, derive(Debug))]
pub struct IdentitySettings {
    lookup_url: Url,
    bearer_token: String,
    timeout: Duration,
}

impl IdentitySettings {
    /// Profile lookup endpoint.
    #[must_use]
    pub fn lookup_url(&self) -> &Url {
        &self.lookup_url
    }

    /// Bearer token presented to the provider.
    #[must_use]
    pub fn bearer_token(&self) -> &str {
        &self.bearer_token
    }

    /// Budget for one provider call.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Truncated SHA-256 fingerprint of the bearer token.
    ///
    /// Logged on startup so operators can verify which credential is active
    /// without exposing the token itself.
    #[must_use]
    pub fn token_fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.bearer_token.as_bytes());
        let digest = hasher.finalize();
        hex::encode(&digest[..FINGERPRINT_BYTES])
    }
}
