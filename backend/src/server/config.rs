//! HTTP server configuration object and helpers.

use askbox_backend::outbound::identity::HttpIdentityProfileSource;
use askbox_backend::outbound::persistence::DbPool;
use std::net::SocketAddr;
use std::sync::Arc;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) identity: Option<Arc<HttpIdentityProfileSource>>,
}

impl ServerConfig {
    /// Construct a server configuration listening on the given address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            identity: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, the server will use database-backed implementations
    /// for the question, account, and notification ports.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach an identity provider adapter for handle resolution.
    ///
    /// Without one, unknown handles are resolved against the fixture
    /// provider, which only knows the built-in sample profiles.
    #[must_use]
    pub fn with_identity(mut self, source: Arc<HttpIdentityProfileSource>) -> Self {
        self.identity = Some(source);
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(
            dead_code,
            reason = "Exercised by integration tests; retained for fixture access"
        )
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
