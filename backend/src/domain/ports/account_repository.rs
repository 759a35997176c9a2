//! Port for account persistence.

use async_trait::async_trait;

use crate::domain::{Account, Handle};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "account repository query failed: {message}",
        /// Insert lost a race against another writer storing the same handle.
        DuplicateHandle { handle: String } =>
            "account handle @{handle} is already stored",
    }
}

/// Port for reading and writing locally stored accounts.
///
/// `insert` must surface unique-handle violations as
/// [`AccountPersistenceError::DuplicateHandle`] so that callers can recover
/// by re-reading the row the concurrent winner stored.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its handle, if one is stored.
    async fn find_by_handle(
        &self,
        handle: &Handle,
    ) -> Result<Option<Account>, AccountPersistenceError>;

    /// Persist a new account and return the stored row.
    async fn insert(&self, account: &Account) -> Result<Account, AccountPersistenceError>;

    /// List up to `limit` stored accounts whose handle differs from
    /// `not_user`.
    async fn list_excluding(
        &self,
        not_user: &Handle,
        limit: i64,
    ) -> Result<Vec<Account>, AccountPersistenceError>;
}

/// Fixture implementation for tests that do not exercise account persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountRepository;

#[async_trait]
impl AccountRepository for FixtureAccountRepository {
    async fn find_by_handle(
        &self,
        _handle: &Handle,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        Ok(None)
    }

    async fn insert(&self, account: &Account) -> Result<Account, AccountPersistenceError> {
        Ok(account.clone())
    }

    async fn list_excluding(
        &self,
        _not_user: &Handle,
        _limit: i64,
    ) -> Result<Vec<Account>, AccountPersistenceError> {
        Ok(Vec::new())
    }
}
