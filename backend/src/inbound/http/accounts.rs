//! Account API handlers.
//!
//! ```text
//! GET /api/v1/accounts/{handle}
//! GET /api/v1/accounts?notUser=alice&limit=6
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{GetAccountRequest, ListOtherAccountsRequest};
use crate::domain::{Account, Error, MAX_OTHER_ACCOUNTS_LIMIT};
use crate::inbound::http::ApiResult;
use crate::inbound::http::questions::HandlePath;
use crate::inbound::http::state::HttpState;

/// Query parameters for listing accounts other than one handle's.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListAccountsQuery {
    /// Handle whose account is excluded from the listing.
    pub not_user: Option<String>,
    /// Listing size cap; defaults when absent.
    pub limit: Option<i64>,
}

/// Fetch the account behind a handle, resolving it on demand.
///
/// A handle this service has not seen before is looked up against the
/// identity provider and cached, so a first fetch can fail with 404 (the
/// provider does not know the handle) or 503 (the provider could not be
/// consulted).
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{handle}",
    params(
        ("handle" = String, Path, description = "Account handle, with or without a leading @")
    ),
    responses(
        (status = 200, description = "Resolved account", body = Account),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Handle unknown to the identity provider", body = Error),
        (status = 503, description = "Identity provider unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "getAccount"
)]
#[get("/accounts/{handle}")]
pub async fn get_account(
    state: web::Data<HttpState>,
    path: web::Path<HandlePath>,
) -> ApiResult<web::Json<Account>> {
    let response = state
        .accounts
        .get_account(GetAccountRequest {
            handle: path.into_inner().handle,
        })
        .await?;
    Ok(web::Json(response.account))
}

/// List stored accounts other than the named handle's.
///
/// Backs the "other inboxes" rail on account pages; only already-stored
/// accounts appear, so the identity provider is never consulted.
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    params(
        ("notUser" = String, Query, description = "Handle whose account is excluded"),
        ("limit" = Option<i64>, Query, description = "Number of accounts to return, default 6, max 50")
    ),
    responses(
        (status = 200, description = "Stored accounts", body = [Account]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Service unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "listOtherAccounts"
)]
#[get("/accounts")]
pub async fn list_other_accounts(
    state: web::Data<HttpState>,
    query: web::Query<ListAccountsQuery>,
) -> ApiResult<web::Json<Vec<Account>>> {
    let query = query.into_inner();
    let not_user = query.not_user.ok_or_else(|| {
        Error::invalid_request("notUser query parameter is required").with_details(json!({
            "field": "notUser",
            "code": "missing_field",
        }))
    })?;
    if let Some(limit) = query.limit {
        if !(1..=MAX_OTHER_ACCOUNTS_LIMIT).contains(&limit) {
            return Err(Error::invalid_request(format!(
                "limit must be between 1 and {MAX_OTHER_ACCOUNTS_LIMIT}"
            ))
            .with_details(json!({
                "field": "limit",
                "code": "out_of_range",
            })));
        }
    }

    let response = state
        .accounts
        .list_other_accounts(ListOtherAccountsRequest {
            not_user,
            limit: query.limit,
        })
        .await?;
    Ok(web::Json(response.accounts))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
