//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.
//!
//! This adapter persists resolved provider accounts and rehydrates them
//! through validated domain constructors. The unique constraint on the
//! handle column arbitrates concurrent resolution: a losing insert is
//! reported as [`AccountPersistenceError::DuplicateHandle`] so the caller
//! can re-read the winning row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AccountPersistenceError, AccountRepository};
use crate::domain::{Account, AccountId, AccountValidationError, Handle};

use super::diesel_error_mapping::{map_statement_error, pool_error_message};
use super::models::{AccountRow, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

/// Diesel-backed implementation of the account repository port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> AccountPersistenceError {
    AccountPersistenceError::connection(pool_error_message(error))
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> AccountPersistenceError {
    map_statement_error(
        error,
        AccountPersistenceError::query,
        AccountPersistenceError::connection,
    )
}

/// Map insert failures, surfacing unique-constraint hits as duplicates.
///
/// The attempted handle is reported from the caller's side rather than
/// parsed out of the driver message.
fn map_insert_error(error: diesel::result::Error, handle: &Handle) -> AccountPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        tracing::debug!(
            constraint = info.constraint_name(),
            "account insert lost a unique-constraint race"
        );
        return AccountPersistenceError::duplicate_handle(handle.as_ref());
    }
    map_diesel_error(error)
}

fn invalid_row(error: AccountValidationError) -> AccountPersistenceError {
    AccountPersistenceError::query(error.to_string())
}

/// Convert a database row into a validated domain account.
///
/// Shared with the question adapter, which joins recipients into its
/// listings.
pub(super) fn row_to_account(row: AccountRow) -> Result<Account, AccountPersistenceError> {
    let AccountRow {
        id,
        external_id,
        handle,
        display_name,
        bio,
        avatar_url,
        created_at: _,
        updated_at: _,
    } = row;

    Ok(Account::new(
        AccountId::from_uuid(id),
        external_id.try_into().map_err(invalid_row)?,
        Handle::new(handle).map_err(|err| invalid_row(err.into()))?,
        display_name.try_into().map_err(invalid_row)?,
        bio.try_into().map_err(invalid_row)?,
        avatar_url.try_into().map_err(invalid_row)?,
    ))
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn find_by_handle(
        &self,
        handle: &Handle,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = accounts::table
            .filter(accounts::handle.eq(handle.as_ref()))
            .select(AccountRow::as_select())
            .first::<AccountRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn insert(&self, account: &Account) -> Result<Account, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewAccountRow {
            id: *account.id().as_uuid(),
            external_id: account.external_id().as_ref(),
            handle: account.handle().as_ref(),
            display_name: account.display_name().as_ref(),
            bio: account.bio().as_ref(),
            avatar_url: account.avatar_url().as_ref(),
        };

        diesel::insert_into(accounts::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(|error| map_insert_error(error, account.handle()))?;

        Ok(account.clone())
    }

    async fn list_excluding(
        &self,
        not_user: &Handle,
        limit: i64,
    ) -> Result<Vec<Account>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AccountRow> = accounts::table
            .filter(accounts::handle.ne(not_user.as_ref()))
            .order((accounts::created_at.asc(), accounts::id.asc()))
            .limit(limit)
            .select(AccountRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_account).collect()
    }
}
