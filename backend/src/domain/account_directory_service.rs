//! Account directory domain services.
//!
//! Implements the account read port on top of the account repository and the
//! identity provider. Unknown handles are resolved on demand: the canonical
//! profile is fetched from the provider and stored locally, so each handle is
//! looked up at most once per stored account.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    AccountPersistenceError, AccountQuery, AccountRepository, GetAccountRequest,
    GetAccountResponse, IdentityProfileSource, IdentityProviderError, ListOtherAccountsRequest,
    ListOtherAccountsResponse,
};
use crate::domain::{Account, AccountId, Error, Handle};

/// Listing size applied when a request names no limit.
pub const DEFAULT_OTHER_ACCOUNTS_LIMIT: i64 = 6;

/// Largest accepted listing size.
pub const MAX_OTHER_ACCOUNTS_LIMIT: i64 = 50;

fn map_repository_error(error: AccountPersistenceError) -> Error {
    match error {
        AccountPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        AccountPersistenceError::Query { message } => {
            Error::internal(format!("account repository error: {message}"))
        }
        AccountPersistenceError::DuplicateHandle { handle } => {
            Error::internal(format!("unrecovered duplicate for handle @{handle}"))
        }
    }
}

fn map_provider_error(error: IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::ProfileNotFound { handle } => {
            Error::not_found(format!("no account exists for @{handle}"))
        }
        other => Error::service_unavailable(other.to_string()),
    }
}

/// Look up the account behind `handle`, consulting the provider on a miss.
///
/// Losing an insert race against a concurrent resolver is recovered by
/// re-reading the row the winner stored, keyed by the handle the provider
/// reported. Both racers therefore return the same stored account, and the
/// conflict never surfaces to callers.
pub(crate) async fn resolve_account<R, P>(
    accounts: &R,
    provider: &P,
    handle: &Handle,
) -> Result<Account, Error>
where
    R: AccountRepository,
    P: IdentityProfileSource,
{
    if let Some(stored) = accounts
        .find_by_handle(handle)
        .await
        .map_err(map_repository_error)?
    {
        return Ok(stored);
    }

    let profile = provider
        .fetch_profile(handle)
        .await
        .map_err(map_provider_error)?;
    let account = Account::try_from_profile(AccountId::random(), profile).map_err(|err| {
        Error::service_unavailable(format!("identity provider returned an invalid profile: {err}"))
    })?;

    match accounts.insert(&account).await {
        Ok(stored) => Ok(stored),
        Err(AccountPersistenceError::DuplicateHandle { .. }) => {
            tracing::debug!(handle = %account.handle(), "lost account insert race; using stored row");
            accounts
                .find_by_handle(account.handle())
                .await
                .map_err(map_repository_error)?
                .ok_or_else(|| {
                    Error::internal(format!(
                        "account @{} vanished after a duplicate-handle conflict",
                        account.handle()
                    ))
                })
        }
        Err(other) => Err(map_repository_error(other)),
    }
}

/// Account directory service implementing the account read port.
#[derive(Clone)]
pub struct AccountDirectoryService<R, P> {
    account_repo: Arc<R>,
    profile_source: Arc<P>,
}

impl<R, P> AccountDirectoryService<R, P> {
    /// Create a new directory service over the account repository and the
    /// identity provider.
    pub fn new(account_repo: Arc<R>, profile_source: Arc<P>) -> Self {
        Self {
            account_repo,
            profile_source,
        }
    }
}

#[async_trait]
impl<R, P> AccountQuery for AccountDirectoryService<R, P>
where
    R: AccountRepository,
    P: IdentityProfileSource,
{
    async fn get_account(&self, request: GetAccountRequest) -> Result<GetAccountResponse, Error> {
        let handle = Handle::parse_lenient(&request.handle)
            .map_err(|err| Error::invalid_request(format!("invalid handle: {err}")))?;
        let account =
            resolve_account(&*self.account_repo, &*self.profile_source, &handle).await?;

        Ok(GetAccountResponse { account })
    }

    async fn list_other_accounts(
        &self,
        request: ListOtherAccountsRequest,
    ) -> Result<ListOtherAccountsResponse, Error> {
        let not_user = Handle::parse_lenient(&request.not_user)
            .map_err(|err| Error::invalid_request(format!("invalid handle: {err}")))?;
        let limit = request.limit.unwrap_or(DEFAULT_OTHER_ACCOUNTS_LIMIT);
        if !(1..=MAX_OTHER_ACCOUNTS_LIMIT).contains(&limit) {
            return Err(Error::invalid_request(format!(
                "limit must be between 1 and {MAX_OTHER_ACCOUNTS_LIMIT}"
            )));
        }

        let accounts = self
            .account_repo
            .list_excluding(&not_user, limit)
            .await
            .map_err(map_repository_error)?;

        Ok(ListOtherAccountsResponse { accounts })
    }
}

#[cfg(test)]
#[path = "account_directory_service_tests.rs"]
mod tests;
