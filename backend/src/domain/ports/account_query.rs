//! Driving port for account reads and on-demand resolution.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Account, AccountId, Error, Handle};

use super::IdentityProfile;

/// Request to fetch one account by handle.
///
/// The handle may carry a leading `@`, which is stripped before lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAccountRequest {
    pub handle: String,
}

/// Response for a single account lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAccountResponse {
    pub account: Account,
}

/// Request to list stored accounts other than one handle's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOtherAccountsRequest {
    pub not_user: String,
    /// Listing size cap; implementations apply a default when absent.
    pub limit: Option<i64>,
}

/// Response containing stored accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOtherAccountsResponse {
    pub accounts: Vec<Account>,
}

/// Driving port for account read operations.
///
/// Fetching an unknown handle triggers resolution against the identity
/// provider, so a successful lookup may have stored a fresh account as a
/// side effect.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), askbox_backend::domain::Error> {
/// use askbox_backend::domain::ports::{AccountQuery, FixtureAccountQuery, GetAccountRequest};
///
/// let query = FixtureAccountQuery;
/// let request = GetAccountRequest {
///     handle: "@alice".to_owned(),
/// };
/// let response = query.get_account(request).await?;
/// assert_eq!(response.account.handle().as_ref(), "alice");
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountQuery: Send + Sync {
    /// Fetch the account behind a handle, resolving it if necessary.
    async fn get_account(&self, request: GetAccountRequest) -> Result<GetAccountResponse, Error>;

    /// List up to `limit` stored accounts other than `not_user`'s.
    async fn list_other_accounts(
        &self,
        request: ListOtherAccountsRequest,
    ) -> Result<ListOtherAccountsResponse, Error>;
}

/// Fixture query for tests that do not need persistence or a provider.
///
/// Mints a deterministic account for any plausible handle.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountQuery;

#[async_trait]
impl AccountQuery for FixtureAccountQuery {
    async fn get_account(&self, request: GetAccountRequest) -> Result<GetAccountResponse, Error> {
        let handle = Handle::parse_lenient(&request.handle)
            .map_err(|err| Error::invalid_request(format!("invalid handle: {err}")))?;
        let account = Account::try_from_profile(
            AccountId::random(),
            IdentityProfile {
                external_id: format!("fixture-{handle}"),
                handle: handle.as_ref().to_owned(),
                display_name: handle.as_ref().to_owned(),
                bio: String::new(),
                avatar_url: format!("https://avatars.example.net/{handle}.png"),
            },
        )
        .map_err(|err| Error::internal(format!("fixture account invalid: {err}")))?;

        Ok(GetAccountResponse { account })
    }

    async fn list_other_accounts(
        &self,
        _request: ListOtherAccountsRequest,
    ) -> Result<ListOtherAccountsResponse, Error> {
        Ok(ListOtherAccountsResponse {
            accounts: Vec::new(),
        })
    }
}
